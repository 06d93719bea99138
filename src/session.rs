use std::sync::Arc;

use crate::error::TtsError;

/// One complete encoded audio clip. The bytes are immutable once built;
/// clones share the same allocation so the session cache, a playback
/// thread, and a save operation can all hold the clip at once.
#[derive(Clone, Debug)]
pub struct AudioClip {
    bytes: Arc<Vec<u8>>,
}

impl AudioClip {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::new(bytes),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Holds the single most recent synthesis result. Last write wins; there
/// is never a partially written clip in here.
#[derive(Default)]
pub struct SessionState {
    last_audio: Option<AudioClip>,
}

impl SessionState {
    pub fn record_synthesis(&mut self, clip: AudioClip) {
        self.last_audio = Some(clip);
    }

    pub fn current_audio(&self) -> Option<AudioClip> {
        self.last_audio.clone()
    }

    pub fn clear(&mut self) {
        self.last_audio = None;
    }

    /// Accessor for operations that cannot proceed without a cached clip
    /// (play again, save).
    pub fn require_audio(&self) -> Result<AudioClip, TtsError> {
        self.current_audio().ok_or(TtsError::NoAudioAvailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_returns_identical_bytes() {
        let mut session = SessionState::default();
        assert!(session.current_audio().is_none());

        session.record_synthesis(AudioClip::new(vec![1, 2, 3, 4]));
        assert_eq!(session.current_audio().unwrap().as_bytes(), &[1, 2, 3, 4]);
        // Reading does not consume the clip
        assert_eq!(session.current_audio().unwrap().as_bytes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn last_write_wins() {
        let mut session = SessionState::default();
        session.record_synthesis(AudioClip::new(vec![1]));
        session.record_synthesis(AudioClip::new(vec![9, 9]));
        assert_eq!(session.current_audio().unwrap().as_bytes(), &[9, 9]);
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut session = SessionState::default();
        session.record_synthesis(AudioClip::new(vec![1]));
        session.clear();
        assert!(session.current_audio().is_none());
        assert!(matches!(
            session.require_audio(),
            Err(TtsError::NoAudioAvailable)
        ));
    }

    #[test]
    fn clones_share_the_allocation() {
        let clip = AudioClip::new(vec![7; 1024]);
        let other = clip.clone();
        assert!(std::ptr::eq(clip.as_bytes(), other.as_bytes()));
    }
}
