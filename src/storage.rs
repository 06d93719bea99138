use std::path::Path;

use anyhow::anyhow;

use crate::error::TtsError;
use crate::session::AudioClip;

/// Write the clip's bytes verbatim to `path`, overwriting any existing
/// file. The cached clip is untouched either way, so a failed save can be
/// retried.
pub fn save_clip(clip: &AudioClip, path: &Path) -> Result<(), TtsError> {
    std::fs::write(path, clip.as_bytes()).map_err(|e| {
        TtsError::PersistenceFailed(anyhow!("Could not write {}: {}", path.display(), e))
    })
}

/// Timestamped suggestion for the save field, e.g. `tts-20260806-142311.mp3`.
pub fn default_file_name() -> String {
    format!("tts-{}.mp3", chrono::Local::now().format("%Y%m%d-%H%M%S"))
}
