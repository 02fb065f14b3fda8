use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::model::EdgeRequest;

mod ssml;
pub use ssml::ssml_preview;

static LOCALE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-z]{2,3}-[A-Z]{2})-").unwrap());

/// Signed strings the Edge endpoint expects for prosody, e.g. `+15%`, `-5Hz`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Prosody {
    pub rate: String,
    pub pitch: String,
    pub volume: String,
}

impl Prosody {
    pub fn from_request(request: &EdgeRequest) -> Self {
        Self {
            rate: format!("{:+}%", request.rate_percent),
            pitch: format!("{:+}Hz", request.pitch_hz),
            volume: format!("{:+}%", request.volume_percent),
        }
    }
}

/// `zh-CN` out of `zh-CN-XiaoxiaoNeural` or `zh-CN-liaoning-XiaobeiNeural`.
pub fn locale_of(voice_id: &str) -> Option<&str> {
    LOCALE_REGEX
        .captures(voice_id)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}
