/// Validation failures raised while resolving a selection. Each one means the
/// caller and the tables disagree, so none of them is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("unknown voice category: {0}")]
    InvalidCategory(String),

    #[error("voice '{voice}' is not in category '{category}'")]
    UnknownVoice { category: String, voice: String },

    #[error("unknown style preset: {0}")]
    UnknownStyle(String),

    #[error("unknown engine: {0}")]
    UnknownEngine(String),

    #[error("unknown Google language code: {0}")]
    UnknownLanguage(String),
}

/// Broken table data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("category '{0}' has no voices")]
    EmptyCategory(String),

    #[error("category '{0}' is listed twice")]
    DuplicateCategory(String),

    #[error("the catalog has no categories")]
    NoCategories,

    #[error("preset '{0}' is listed twice")]
    DuplicatePreset(String),

    #[error("the 'general' preset is missing")]
    MissingGeneralPreset,

    #[error("the 'general' preset must not change rate or pitch")]
    NonZeroGeneralPreset,

    #[error("'custom' is reserved and cannot name a preset")]
    ReservedPresetKey,

    #[error("Google language '{0}' is listed twice")]
    DuplicateLanguage(String),
}
