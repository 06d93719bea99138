//! Synthesizer client: turns (text, language code) into a complete MP3
//! clip via the Google Translate TTS endpoint, or fails with a classified
//! error. Runs on a worker thread; never call this from the UI thread.

use std::io::Read;

use anyhow::anyhow;

use crate::api::client::UREQ_AGENT;
use crate::config::Config;
use crate::error::TtsError;
use crate::languages;
use crate::session::AudioClip;

/// The `client=tw-ob` identifier is what the public translate widget sends;
/// the endpoint refuses other values.
pub fn build_request_url(endpoint: &str, text: &str, lang_code: &str) -> String {
    format!(
        "{}?ie=UTF-8&tl={}&client=tw-ob&q={}",
        endpoint,
        lang_code,
        urlencoding::encode(text)
    )
}

pub fn synthesize(config: &Config, text: &str, lang_code: &str) -> Result<AudioClip, TtsError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TtsError::InvalidInput("Please enter some text.".to_string()));
    }
    if !languages::is_supported_code(lang_code) {
        return Err(TtsError::InvalidInput(format!(
            "Unsupported language code: {}",
            lang_code
        )));
    }

    let url = build_request_url(&config.tts_endpoint, text, lang_code);
    let response = UREQ_AGENT
        .get(&url)
        .header("User-Agent", config.user_agent.as_str())
        .call()?;

    // Accumulate until EOF; a short read here would hand the player a
    // truncated clip.
    let mut data = Vec::new();
    response
        .into_body()
        .into_reader()
        .read_to_end(&mut data)
        .map_err(|e| TtsError::SynthesisFailed(anyhow!("Failed to read audio stream: {}", e)))?;

    if data.is_empty() {
        return Err(TtsError::SynthesisFailed(anyhow!(
            "Provider returned an empty audio stream"
        )));
    }

    Ok(AudioClip::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on port 9; if validation ever let a request through,
    // these tests would see SynthesisFailed instead of InvalidInput.
    fn offline_config() -> Config {
        Config {
            tts_endpoint: "http://127.0.0.1:9/translate_tts".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn url_encodes_text_and_language() {
        let url = build_request_url(
            "https://translate.google.com/translate_tts",
            "Hello world",
            "en",
        );
        assert_eq!(
            url,
            "https://translate.google.com/translate_tts?ie=UTF-8&tl=en&client=tw-ob&q=Hello%20world"
        );
    }

    #[test]
    fn url_encodes_non_ascii_text() {
        let url = build_request_url("https://host/tts", "héllo & au revoir", "fr");
        assert!(url.contains("tl=fr"));
        assert!(url.contains("q=h%C3%A9llo%20%26%20au%20revoir"));
    }

    #[test]
    fn empty_text_is_rejected_before_any_network() {
        let err = synthesize(&offline_config(), "", "en").unwrap_err();
        assert!(matches!(err, TtsError::InvalidInput(_)));
    }

    #[test]
    fn whitespace_only_text_is_rejected() {
        let err = synthesize(&offline_config(), "   \t\n", "en").unwrap_err();
        assert!(matches!(err, TtsError::InvalidInput(_)));
    }

    #[test]
    fn unsupported_language_is_rejected() {
        let err = synthesize(&offline_config(), "Hello", "tlh").unwrap_err();
        assert!(matches!(err, TtsError::InvalidInput(_)));
    }

    #[test]
    fn unreachable_endpoint_classifies_as_synthesis_failure() {
        let err = synthesize(&offline_config(), "Hello", "en").unwrap_err();
        assert!(matches!(err, TtsError::SynthesisFailed(_)));
    }
}
