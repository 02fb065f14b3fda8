use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResolveError;

pub const GENERAL_STYLE: &str = "general";
pub const CUSTOM_STYLE: &str = "custom";

const EDGE_MAX_CHARS: usize = 1000;
const GOOGLE_MAX_CHARS: usize = 200;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Edge,
    Google,
}

impl Engine {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Edge => "edge",
            Self::Google => "google",
        }
    }

    /// Longest text a single request to this engine may carry.
    pub fn max_chunk_chars(self) -> usize {
        match self {
            Self::Edge => EDGE_MAX_CHARS,
            Self::Google => GOOGLE_MAX_CHARS,
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "edge" | "edge-tts" => Ok(Self::Edge),
            "google" | "google-tts" | "gtts" => Ok(Self::Google),
            _ => Err(ResolveError::UnknownEngine(s.to_string())),
        }
    }
}

/// True if the identifier or the label carries one of the style markers.
pub(crate) fn has_style_marker(id: &str, label: &str, markers: &[String]) -> bool {
    markers
        .iter()
        .any(|marker| id.contains(marker.as_str()) || label.contains(marker.as_str()))
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub id: String,
    pub label: String,
    supports_style: bool,
}

impl Voice {
    pub(crate) fn new(id: String, label: String, markers: &[String]) -> Self {
        let supports_style = has_style_marker(&id, &label, markers);

        Self {
            id,
            label,
            supports_style,
        }
    }

    pub fn supports_style(&self) -> bool {
        self.supports_style
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VoiceCategory {
    pub label: String,
    pub voices: Vec<Voice>,
}

impl VoiceCategory {
    pub fn voice(&self, id: &str) -> Option<&Voice> {
        self.voices.iter().find(|voice| voice.id == id)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StylePreset {
    pub key: String,
    #[serde(rename = "rate")]
    pub rate_delta: i32,
    #[serde(rename = "pitch")]
    pub pitch_delta: i32,
    pub label: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GoogleLanguage {
    pub code: String,
    pub label: String,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresetValues {
    pub rate_percent: i32,
    pub pitch_hz: i32,
}

/// Which entry the style picker shows. `Custom` means the sliders were
/// edited by hand after a preset was applied.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum StyleSelection {
    Preset(String),
    Custom,
}

impl StyleSelection {
    pub fn general() -> Self {
        Self::Preset(GENERAL_STYLE.to_string())
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Preset(key) => key,
            Self::Custom => CUSTOM_STYLE,
        }
    }
}

impl Default for StyleSelection {
    fn default() -> Self {
        Self::general()
    }
}

impl From<&str> for StyleSelection {
    fn from(s: &str) -> Self {
        match s.trim() {
            "" => Self::general(),
            CUSTOM_STYLE => Self::Custom,
            key => Self::Preset(key.to_string()),
        }
    }
}

impl From<String> for StyleSelection {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<StyleSelection> for String {
    fn from(selection: StyleSelection) -> Self {
        selection.key().to_string()
    }
}

impl fmt::Display for StyleSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ProsodyState {
    pub style: StyleSelection,
    pub rate_percent: i32,
    pub pitch_hz: i32,
}

impl ProsodyState {
    /// Drops the named preset but keeps the edited numbers.
    #[must_use]
    pub fn mark_custom(self) -> Self {
        Self {
            style: StyleSelection::Custom,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: i32,
    pub max: i32,
}

impl Bounds {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn clamp(self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamLimits {
    pub rate: Bounds,
    pub pitch: Bounds,
    pub volume: Bounds,
}

impl Default for ParamLimits {
    fn default() -> Self {
        Self {
            rate: Bounds::new(-100, 100),
            pitch: Bounds::new(-100, 100),
            volume: Bounds::new(-50, 50),
        }
    }
}

/// Untrusted selection bundle as the form reports it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSelection {
    pub engine: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub voice: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub rate_percent: i32,
    #[serde(default)]
    pub pitch_hz: i32,
    #[serde(default)]
    pub volume_percent: i32,
    #[serde(default)]
    pub trim_silence: bool,
    #[serde(default)]
    pub slow: bool,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EdgeRequest {
    pub voice_id: String,
    pub rate_percent: i32,
    pub pitch_hz: i32,
    pub volume_percent: i32,
    pub style: Option<String>,
    pub trim_silence: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GoogleRequest {
    pub language_code: String,
    pub slow: bool,
    pub trim_silence: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "engine", rename_all = "lowercase")]
pub enum SynthesisRequest {
    Edge(EdgeRequest),
    Google(GoogleRequest),
}

impl SynthesisRequest {
    pub fn engine(&self) -> Engine {
        match self {
            Self::Edge(_) => Engine::Edge,
            Self::Google(_) => Engine::Google,
        }
    }

    pub fn style(&self) -> Option<&str> {
        match self {
            Self::Edge(request) => request.style.as_deref(),
            Self::Google(_) => None,
        }
    }

    pub fn trim_silence(&self) -> bool {
        match self {
            Self::Edge(request) => request.trim_silence,
            Self::Google(request) => request.trim_silence,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub identifier: String,
    pub content: String,
}

impl BatchJob {
    /// Archive entry name for the audio this job produces.
    pub fn file_name(&self) -> String {
        format!("{}.mp3", self.identifier)
    }
}
