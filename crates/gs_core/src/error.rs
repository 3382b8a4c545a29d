use thiserror::Error;

/// Errors raised while building or querying a [`GameStateTable`].
///
/// Only construction failures and missing query columns are errors.
/// "No rows" results and malformed inventories are not; see
/// [`QueryOutcome`] and [`extract_classes`].
///
/// [`GameStateTable`]: crate::state::GameStateTable
/// [`QueryOutcome`]: crate::analysis::QueryOutcome
/// [`extract_classes`]: crate::models::extract_classes
#[derive(Error, Debug)]
pub enum GameStateError {
    #[error("Failed to load dataset {path}: {reason}")]
    DataLoad { path: String, reason: String },

    #[error("Missing '{0}' column in dataset")]
    MissingColumn(String),

    #[error("Invalid boundary polygon: {0}")]
    InvalidBoundary(String),

    #[error("Invalid zone config: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GameStateError {
    pub fn data_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        GameStateError::DataLoad { path: path.into(), reason: reason.into() }
    }

    /// True for dataset/enrichment failures; false for zone-config and
    /// query-time column errors.
    pub fn is_fatal(&self) -> bool {
        match self {
            GameStateError::MissingColumn(name) => name == "inventory",
            GameStateError::Config(_) | GameStateError::Json(_) | GameStateError::Yaml(_) => false,
            _ => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, GameStateError>;
