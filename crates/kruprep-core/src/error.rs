//! Error types for kruprep-core.
//!
//! Each subsystem owns a small error enum; [`CoreError`] is the umbrella for
//! callers that do not need to discriminate, and the crate-level [`Result`]
//! alias defaults to it. Lookup misses are not errors: store operations
//! return `Ok(None)` / `Ok(false)` for unknown ids.

use thiserror::Error;

use crate::quiz::QuizPhase;

/// Errors from the persistence layer: repository IO and blob decoding.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored question data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration load/save failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Errors that abort a batch import before anything is persisted.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("import payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("import payload must be a JSON array of questions")]
    NotAnArray,

    #[error("invalid question at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Question draft rejections, mirroring the admin form rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("a question needs at least two non-empty choices")]
    TooFewChoices,

    #[error("the answer must match one of the choices exactly")]
    AnswerNotInChoices,
}

/// Quiz state machine rejections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("no questions available for the selected category")]
    EmptyPool,

    #[error("operation requires the {expected} phase but the quiz is in {actual}")]
    InvalidPhase {
        expected: QuizPhase,
        actual: QuizPhase,
    },

    #[error("no answer selected for the current question")]
    NoSelection,
}

/// Errors from the Gemini question generator.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("no Gemini API key configured (set generator.api_key or GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("the Gemini API key was rejected; check the configured key")]
    InvalidApiKey,

    #[error("http error calling the Gemini API: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unusable model response: {0}")]
    UnusableResponse(String),
}

/// Umbrella error for the whole crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("import error: {0}")]
    Import(#[from] ImportError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("quiz error: {0}")]
    Quiz(#[from] QuizError),

    #[error("generator error: {0}")]
    Generator(#[from] GeneratorError),

    #[error("{0}")]
    Custom(String),
}

pub type Result<T, E = CoreError> = std::result::Result<T, E>;
