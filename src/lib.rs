#![warn(clippy::pedantic)]

pub mod batch;
pub mod bing_speech;
pub mod config;
pub mod db;
pub mod error;
pub mod google_translate;
pub mod model;
pub mod resolver;
pub mod tts;

pub use batch::{parse_batch, BatchPlan, PlannedJob};
pub use db::{Catalog, CATALOG};
pub use error::{CatalogError, ResolveError};
pub use model::{
    BatchJob, EdgeRequest, Engine, GoogleRequest, ParamLimits, ProsodyState, RawSelection,
    StyleSelection, SynthesisRequest, Voice,
};
pub use resolver::{mark_custom, ParameterResolver};
