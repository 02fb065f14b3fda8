use crate::db::{Catalog, CATALOG};
use crate::error::ResolveError;
use crate::model::{
    has_style_marker, Bounds, EdgeRequest, Engine, GoogleRequest, ParamLimits, PresetValues,
    ProsodyState, RawSelection, StyleSelection, SynthesisRequest, Voice, GENERAL_STYLE,
};

/// Turns raw form selections into a synthesis request. Holds no state of its
/// own, so every call is independent of the previous one.
#[derive(Debug, Clone, Copy)]
pub struct ParameterResolver<'a> {
    catalog: &'a Catalog,
    limits: ParamLimits,
}

impl Default for ParameterResolver<'static> {
    fn default() -> Self {
        Self::new(&CATALOG, ParamLimits::default())
    }
}

impl<'a> ParameterResolver<'a> {
    pub fn new(catalog: &'a Catalog, limits: ParamLimits) -> Self {
        Self { catalog, limits }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn limits(&self) -> ParamLimits {
        self.limits
    }

    pub fn categories(&self) -> impl Iterator<Item = &'a str> {
        self.catalog.categories().iter().map(|c| c.label.as_str())
    }

    pub fn voices(&self, category: &str) -> Result<&'a [Voice], ResolveError> {
        self.catalog
            .category(category)
            .map(|c| c.voices.as_slice())
            .ok_or_else(|| ResolveError::InvalidCategory(category.to_string()))
    }

    /// First voice of the category. Used to re-seed the voice picker
    /// whenever the category changes.
    pub fn resolve_default_voice(&self, category: &str) -> Result<&'a Voice, ResolveError> {
        self.voices(category)?
            .first()
            .ok_or_else(|| ResolveError::InvalidCategory(category.to_string()))
    }

    pub fn compute_style_support(&self, voice: &Voice) -> bool {
        has_style_marker(&voice.id, &voice.label, self.catalog.style_markers())
    }

    /// Style picker value after the voice changed.
    pub fn reconcile_style(&self, voice: &Voice, selection: StyleSelection) -> StyleSelection {
        if self.compute_style_support(voice) {
            selection
        } else {
            StyleSelection::general()
        }
    }

    /// Preset values replace the current sliders outright.
    pub fn apply_style_preset(&self, key: &str) -> Result<PresetValues, ResolveError> {
        let preset = self
            .catalog
            .preset(key)
            .ok_or_else(|| ResolveError::UnknownStyle(key.to_string()))?;

        Ok(PresetValues {
            rate_percent: preset.rate_delta,
            pitch_hz: preset.pitch_delta,
        })
    }

    pub fn select_preset(&self, key: &str) -> Result<ProsodyState, ResolveError> {
        let values = self.apply_style_preset(key)?;

        Ok(ProsodyState {
            style: StyleSelection::Preset(key.to_string()),
            rate_percent: values.rate_percent,
            pitch_hz: values.pitch_hz,
        })
    }

    pub fn resolve_request(&self, selection: &RawSelection) -> Result<SynthesisRequest, ResolveError> {
        match selection.engine.parse::<Engine>()? {
            Engine::Google => self.resolve_google(selection).map(SynthesisRequest::Google),
            Engine::Edge => self.resolve_edge(selection).map(SynthesisRequest::Edge),
        }
    }

    fn resolve_google(&self, selection: &RawSelection) -> Result<GoogleRequest, ResolveError> {
        let code = selection.language.as_deref().unwrap_or_default().trim();

        let language = self
            .catalog
            .google_language(code)
            .ok_or_else(|| ResolveError::UnknownLanguage(code.to_string()))?;

        Ok(GoogleRequest {
            language_code: language.code.clone(),
            slow: selection.slow,
            trim_silence: selection.trim_silence,
        })
    }

    fn resolve_edge(&self, selection: &RawSelection) -> Result<EdgeRequest, ResolveError> {
        let category = self
            .catalog
            .category(&selection.category)
            .ok_or_else(|| ResolveError::InvalidCategory(selection.category.clone()))?;

        let voice = category
            .voice(&selection.voice)
            .ok_or_else(|| ResolveError::UnknownVoice {
                category: category.label.clone(),
                voice: selection.voice.clone(),
            })?;

        let style = if self.compute_style_support(voice) {
            self.style_tag(StyleSelection::from(selection.style.as_str()))?
        } else {
            if StyleSelection::from(selection.style.as_str()) != StyleSelection::general() {
                tracing::debug!(
                    voice = %voice.id,
                    style = %selection.style,
                    "Voice has no style support, dropping style"
                );
            }
            None
        };

        Ok(EdgeRequest {
            voice_id: voice.id.clone(),
            rate_percent: clamp("rate_percent", selection.rate_percent, self.limits.rate),
            pitch_hz: clamp("pitch_hz", selection.pitch_hz, self.limits.pitch),
            volume_percent: clamp("volume_percent", selection.volume_percent, self.limits.volume),
            style,
            trim_silence: selection.trim_silence,
        })
    }

    fn style_tag(&self, selection: StyleSelection) -> Result<Option<String>, ResolveError> {
        match selection {
            StyleSelection::Custom => Ok(None),
            StyleSelection::Preset(key) => {
                self.catalog
                    .preset(&key)
                    .ok_or_else(|| ResolveError::UnknownStyle(key.clone()))?;

                Ok((key != GENERAL_STYLE).then_some(key))
            }
        }
    }
}

/// Hand edit of rate or pitch after a preset was applied.
pub fn mark_custom(rate_percent: i32, pitch_hz: i32) -> ProsodyState {
    ProsodyState {
        style: StyleSelection::Custom,
        rate_percent,
        pitch_hz,
    }
}

fn clamp(field: &'static str, value: i32, bounds: Bounds) -> i32 {
    let clamped = bounds.clamp(value);

    if clamped != value {
        tracing::debug!(field, value, clamped, "Clamped out-of-range value");
    }

    clamped
}
