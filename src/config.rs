use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// --- DEFAULTS ---

fn default_endpoint() -> String {
    "https://translate.google.com/translate_tts".to_string()
}

// Google rejects requests without a browser-looking user agent.
fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_language() -> String {
    "English".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub tts_endpoint: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default = "default_true")]
    pub play_on_convert: bool,
    #[serde(default)]
    pub last_save_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tts_endpoint: default_endpoint(),
            user_agent: default_user_agent(),
            default_language: default_language(),
            play_on_convert: default_true(),
            last_save_dir: None,
        }
    }
}

pub fn get_config_path() -> PathBuf {
    let config_dir = dirs::config_dir().unwrap_or_default().join("talkbox");
    let _ = std::fs::create_dir_all(&config_dir);
    config_dir.join("config_v1.json")
}

/// Missing or unreadable config falls back to defaults; a corrupt file is
/// treated the same way rather than blocking startup.
pub fn load_config() -> Config {
    let path = get_config_path();
    if path.exists() {
        let data = std::fs::read_to_string(path).unwrap_or_default();
        serde_json::from_str(&data).unwrap_or_default()
    } else {
        Config::default()
    }
}

pub fn save_config(config: &Config) {
    let path = get_config_path();
    let data = serde_json::to_string_pretty(config).unwrap();
    let _ = std::fs::write(path, data);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_the_translate_endpoint() {
        let config = Config::default();
        assert_eq!(
            config.tts_endpoint,
            "https://translate.google.com/translate_tts"
        );
        assert_eq!(config.default_language, "English");
        assert!(config.play_on_convert);
        assert!(config.last_save_dir.is_none());
    }

    #[test]
    fn empty_json_deserializes_to_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.tts_endpoint, Config::default().tts_endpoint);
        assert_eq!(config.user_agent, "Mozilla/5.0");
    }

    #[test]
    fn round_trips_through_json() {
        let mut config = Config::default();
        config.default_language = "Korean".to_string();
        config.play_on_convert = false;
        config.last_save_dir = Some(PathBuf::from("/tmp/clips"));

        let data = serde_json::to_string(&config).unwrap();
        let reloaded: Config = serde_json::from_str(&data).unwrap();
        assert_eq!(reloaded.default_language, "Korean");
        assert!(!reloaded.play_on_convert);
        assert_eq!(reloaded.last_save_dir, Some(PathBuf::from("/tmp/clips")));
    }
}
