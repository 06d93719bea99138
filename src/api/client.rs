use lazy_static::lazy_static;
use std::time::Duration;

// Bounds the whole exchange, including the body read. The provider answers
// short clips in well under a second; anything past this is a hang.
const REQUEST_TIMEOUT_SECS: u64 = 30;

lazy_static! {
    pub static ref UREQ_AGENT: ureq::Agent = {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
            .build();
        config.into()
    };
}
