use anyhow::anyhow;
use thiserror::Error;

/// Failure taxonomy for the synthesis/playback pipeline. Every operation
/// boundary converts one of these into a user-visible status message;
/// nothing here is allowed to take the process down.
#[derive(Error, Debug)]
pub enum TtsError {
    /// Rejected before any I/O: empty text or an unsupported language.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network failure, non-success status, timeout, or an empty response
    /// body. The session cache is never touched when this is returned.
    #[error("Speech synthesis failed: {0}")]
    SynthesisFailed(anyhow::Error),

    /// Decode or output-device failure. The cached clip stays usable.
    #[error("Playback failed: {0}")]
    PlaybackFailed(anyhow::Error),

    /// Play-again or save was requested with nothing in the session cache.
    #[error("No audio available. Convert some text first.")]
    NoAudioAvailable,

    /// Disk write failure. The cached clip stays intact for a retry.
    #[error("Could not save audio: {0}")]
    PersistenceFailed(anyhow::Error),
}

impl From<ureq::Error> for TtsError {
    fn from(source: ureq::Error) -> Self {
        Self::SynthesisFailed(anyhow!(source))
    }
}
