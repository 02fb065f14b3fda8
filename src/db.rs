use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::CatalogError;
use crate::model::{
    GoogleLanguage, StylePreset, Voice, VoiceCategory, CUSTOM_STYLE, GENERAL_STYLE,
};

pub static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_json(
        include_str!("../assets/edge_voices.json"),
        include_str!("../assets/style_presets.json"),
        include_str!("../assets/google_languages.json"),
    )
    .expect("Embedded catalog is corrupted")
});

structstruck::strike! {
    #[strikethrough[derive(Deserialize, Debug)]]
    struct EdgeVoiceAsset {
        style_markers: Vec<String>,
        categories: Vec<struct CategoryAsset {
            label: String,
            voices: Vec<struct VoiceAsset {
                id: String,
                label: String,
            }>,
        }>,
    }
}

/// Read-only lookup tables shared by every resolution.
#[derive(Debug, Clone)]
pub struct Catalog {
    style_markers: Vec<String>,
    categories: Vec<VoiceCategory>,
    presets: Vec<StylePreset>,
    google_languages: Vec<GoogleLanguage>,
}

impl Catalog {
    pub fn from_json(
        edge_voices: &str,
        style_presets: &str,
        google_languages: &str,
    ) -> Result<Self, CatalogError> {
        let edge: EdgeVoiceAsset = serde_json::from_str(edge_voices)?;

        let categories = edge.categories.into_iter().map(|category| {
            let voices = category.voices.into_iter().map(|v| (v.id, v.label));
            (category.label, voices)
        });

        Self::from_parts(
            edge.style_markers,
            categories,
            serde_json::from_str(style_presets)?,
            serde_json::from_str(google_languages)?,
        )
    }

    /// Builds a catalog from in-memory tables. `categories` lists
    /// `(label, [(voice_id, voice_label)])` in display order.
    pub fn from_parts<C, V>(
        style_markers: Vec<String>,
        categories: C,
        presets: Vec<StylePreset>,
        google_languages: Vec<GoogleLanguage>,
    ) -> Result<Self, CatalogError>
    where
        C: IntoIterator<Item = (String, V)>,
        V: IntoIterator<Item = (String, String)>,
    {
        let categories = categories
            .into_iter()
            .map(|(label, voices)| VoiceCategory {
                label,
                voices: voices
                    .into_iter()
                    .map(|(id, label)| Voice::new(id, label, &style_markers))
                    .collect(),
            })
            .collect::<Vec<_>>();

        let catalog = Self {
            style_markers,
            categories,
            presets,
            google_languages,
        };

        catalog.validate()?;

        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.categories.is_empty() {
            return Err(CatalogError::NoCategories);
        }

        let mut labels = HashSet::new();
        for category in &self.categories {
            if !labels.insert(category.label.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.label.clone()));
            }

            if category.voices.is_empty() {
                return Err(CatalogError::EmptyCategory(category.label.clone()));
            }
        }

        let mut keys = HashSet::new();
        for preset in &self.presets {
            if preset.key == CUSTOM_STYLE {
                return Err(CatalogError::ReservedPresetKey);
            }

            if !keys.insert(preset.key.as_str()) {
                return Err(CatalogError::DuplicatePreset(preset.key.clone()));
            }
        }

        let general = self
            .preset(GENERAL_STYLE)
            .ok_or(CatalogError::MissingGeneralPreset)?;

        if general.rate_delta != 0 || general.pitch_delta != 0 {
            return Err(CatalogError::NonZeroGeneralPreset);
        }

        let mut codes = HashSet::new();
        for language in &self.google_languages {
            if !codes.insert(language.code.to_ascii_lowercase()) {
                return Err(CatalogError::DuplicateLanguage(language.code.clone()));
            }
        }

        Ok(())
    }

    pub fn style_markers(&self) -> &[String] {
        &self.style_markers
    }

    pub fn categories(&self) -> &[VoiceCategory] {
        &self.categories
    }

    pub fn category(&self, label: &str) -> Option<&VoiceCategory> {
        self.categories.iter().find(|c| c.label == label)
    }

    pub fn presets(&self) -> &[StylePreset] {
        &self.presets
    }

    pub fn preset(&self, key: &str) -> Option<&StylePreset> {
        self.presets.iter().find(|p| p.key == key)
    }

    pub fn google_languages(&self) -> &[GoogleLanguage] {
        &self.google_languages
    }

    pub fn google_language(&self, code: &str) -> Option<&GoogleLanguage> {
        self.google_languages
            .iter()
            .find(|l| l.code.eq_ignore_ascii_case(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn general() -> StylePreset {
        StylePreset {
            key: GENERAL_STYLE.to_string(),
            rate_delta: 0,
            pitch_delta: 0,
            label: "General".to_string(),
        }
    }

    fn one_category() -> Vec<(String, Vec<(String, String)>)> {
        vec![(
            "English".to_string(),
            vec![("en-US-AriaNeural".to_string(), "Aria".to_string())],
        )]
    }

    #[test]
    fn embedded_catalog_is_valid() {
        CATALOG.validate().unwrap();

        assert_eq!(CATALOG.categories().len(), 5);
        assert_eq!(CATALOG.categories()[0].label, "簡體中文 (中國)");
        assert_eq!(CATALOG.categories()[0].voices[0].id, "zh-CN-XiaoxiaoNeural");
        assert_eq!(CATALOG.presets().len(), 8);
        assert!(CATALOG.google_language("ZH-TW").is_some());
    }

    #[test]
    fn embedded_style_support() {
        let taiwan = CATALOG.category("繁體中文 (台灣)").unwrap();
        assert!(taiwan.voices.iter().all(|v| !v.supports_style()));

        let us = CATALOG.category("英文 (美國)").unwrap();
        assert!(us.voice("en-US-AriaNeural").unwrap().supports_style());
        assert!(us.voice("en-US-GuyNeural").unwrap().supports_style());
        assert!(!us.voice("en-US-AnaNeural").unwrap().supports_style());
    }

    #[test]
    fn rejects_empty_category() {
        let err = Catalog::from_parts(
            vec![],
            vec![("Empty".to_string(), Vec::<(String, String)>::new())],
            vec![general()],
            vec![],
        )
        .unwrap_err();

        assert!(matches!(err, CatalogError::EmptyCategory(label) if label == "Empty"));
    }

    #[test]
    fn rejects_missing_or_shifted_general() {
        let err = Catalog::from_parts(vec![], one_category(), vec![], vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::MissingGeneralPreset));

        let shifted = StylePreset {
            rate_delta: 5,
            ..general()
        };
        let err = Catalog::from_parts(vec![], one_category(), vec![shifted], vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::NonZeroGeneralPreset));
    }

    #[test]
    fn rejects_reserved_and_duplicate_presets() {
        let custom = StylePreset {
            key: CUSTOM_STYLE.to_string(),
            ..general()
        };
        let err = Catalog::from_parts(vec![], one_category(), vec![general(), custom], vec![])
            .unwrap_err();
        assert!(matches!(err, CatalogError::ReservedPresetKey));

        let err = Catalog::from_parts(vec![], one_category(), vec![general(), general()], vec![])
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicatePreset(key) if key == "general"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Catalog::from_json("{", "[]", "[]").unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }
}
