//! deliberate-core: practice records, activities, and evaluations.
//!
//! This crate owns the data model and the flat-file store that the rest of
//! deliberate builds on, plus the prompt and session logic the CLI drives.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod model;
pub mod prompt;
pub mod registry;
pub mod session;
pub mod store;

pub use config::{load_config, load_config_from, DeliberateConfig};
pub use error::{
    ActivitiesFileError, EvaluationError, PracticesFileError, PromptError, RecordLoadError,
    SessionError,
};
pub use evaluation::{ActivityEvaluation, Evaluation};
pub use model::{Activity, PracticeRecord, ScoreLevel};
pub use registry::ActivityRegistry;
pub use store::Practices;
