use anyhow::{anyhow, Context as _, Result};
use once_cell::sync::OnceCell;
use serde::Deserialize;

use crate::google_translate::DEFAULT_HOST;
use crate::model::{Engine, ProsodyState, RawSelection, StyleSelection};
use crate::resolver::{mark_custom, ParameterResolver};

static CONFIG: OnceCell<Config> = OnceCell::new();

const ENV_PREFIX: &str = "BATCH_TTS_";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_engine")]
    pub engine: String,

    pub category: Option<String>,
    pub voice: Option<String>,

    #[serde(default = "default_style")]
    pub style: String,

    pub rate: Option<i32>,
    pub pitch: Option<i32>,

    #[serde(default)]
    pub volume: i32,

    #[serde(default = "default_trim_silence")]
    pub trim_silence: bool,

    #[serde(default)]
    pub slow: bool,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_google_host")]
    pub google_host: String,

    #[serde(default)]
    pub ssml: bool,
}

fn default_engine() -> String {
    Engine::Edge.to_string()
}

fn default_style() -> String {
    StyleSelection::general().to_string()
}

fn default_trim_silence() -> bool {
    true
}

fn default_language() -> String {
    "zh-cn".to_string()
}

fn default_google_host() -> String {
    DEFAULT_HOST.to_string()
}

impl Config {
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .context("Invalid BATCH_TTS_* environment")
    }

    /// Fills the gaps the way the form does on first render: the first
    /// category, its default voice, and the sliders of the chosen preset.
    /// A slider given explicitly turns the style into `custom`.
    pub fn to_selection(&self, resolver: &ParameterResolver<'_>) -> Result<RawSelection> {
        let engine: Engine = self.engine.parse()?;

        let category = match &self.category {
            Some(category) => category.clone(),
            None => resolver
                .categories()
                .next()
                .context("Voice catalog is empty")?
                .to_string(),
        };

        let voice = match &self.voice {
            Some(voice) => voice.clone(),
            None if engine == Engine::Edge => resolver.resolve_default_voice(&category)?.id.clone(),
            None => String::new(),
        };

        let mut prosody = match StyleSelection::from(self.style.as_str()) {
            StyleSelection::Preset(key) if engine == Engine::Edge => resolver.select_preset(&key)?,
            StyleSelection::Preset(_) => ProsodyState::default(),
            StyleSelection::Custom => mark_custom(0, 0),
        };

        if self.rate.is_some() || self.pitch.is_some() {
            prosody = mark_custom(
                self.rate.unwrap_or(prosody.rate_percent),
                self.pitch.unwrap_or(prosody.pitch_hz),
            );
        }

        if engine == Engine::Edge {
            if let Some(voice) = resolver
                .voices(&category)
                .ok()
                .and_then(|voices| voices.iter().find(|v| v.id == voice))
            {
                prosody.style = resolver.reconcile_style(voice, prosody.style);
            }
        }

        Ok(RawSelection {
            engine: self.engine.clone(),
            category,
            voice,
            style: prosody.style.to_string(),
            rate_percent: prosody.rate_percent,
            pitch_hz: prosody.pitch_hz,
            volume_percent: self.volume,
            trim_silence: self.trim_silence,
            slow: self.slow,
            language: Some(self.language.clone()),
        })
    }
}

pub fn init() -> Result<()> {
    if CONFIG.set(Config::from_vars(std::env::vars())?).is_err() {
        return Err(anyhow!("Failed to set CONFIG"));
    }

    Ok(())
}

pub fn get() -> &'static Config {
    CONFIG.get().expect("config::init was not called")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(vars: &[(&str, &str)]) -> Config {
        Config::from_vars(
            vars.iter()
                .map(|(k, v)| (format!("{ENV_PREFIX}{k}"), (*v).to_string())),
        )
        .unwrap()
    }

    #[test]
    fn defaults() {
        let config = config(&[]);

        assert_eq!(config.engine, "edge");
        assert_eq!(config.style, "general");
        assert!(config.trim_silence);
        assert!(!config.slow);
        assert_eq!(config.google_host, DEFAULT_HOST);
    }

    #[test]
    fn default_selection_uses_first_voice() {
        let resolver = ParameterResolver::default();
        let selection = config(&[]).to_selection(&resolver).unwrap();

        assert_eq!(selection.category, "簡體中文 (中國)");
        assert_eq!(selection.voice, "zh-CN-XiaoxiaoNeural");
        assert_eq!(selection.style, "general");
        assert_eq!((selection.rate_percent, selection.pitch_hz), (0, 0));
    }

    #[test]
    fn preset_fills_sliders() {
        let resolver = ParameterResolver::default();
        let selection = config(&[("STYLE", "sad")]).to_selection(&resolver).unwrap();

        assert_eq!(selection.style, "sad");
        assert_eq!((selection.rate_percent, selection.pitch_hz), (-30, -8));
    }

    #[test]
    fn explicit_slider_marks_custom() {
        let resolver = ParameterResolver::default();
        let selection = config(&[("STYLE", "sad"), ("RATE", "20")])
            .to_selection(&resolver)
            .unwrap();

        assert_eq!(selection.style, "custom");
        assert_eq!((selection.rate_percent, selection.pitch_hz), (20, -8));
    }

    #[test]
    fn incapable_voice_resets_style() {
        let resolver = ParameterResolver::default();
        let selection = config(&[("CATEGORY", "繁體中文 (台灣)"), ("STYLE", "cheerful")])
            .to_selection(&resolver)
            .unwrap();

        assert_eq!(selection.voice, "zh-TW-HsiaoChenNeural");
        assert_eq!(selection.style, "general");
        assert_eq!((selection.rate_percent, selection.pitch_hz), (15, 5));
    }

    #[test]
    fn unknown_engine_is_reported() {
        let resolver = ParameterResolver::default();
        let err = config(&[("ENGINE", "polly")]).to_selection(&resolver).unwrap_err();

        assert!(err.to_string().contains("polly"));
    }
}
