//! Error types for voicenorm

use thiserror::Error;

/// Main error type for voicenorm
#[derive(Error, Debug)]
pub enum Error {
    /// A required lexicon resource is missing or malformed. Fatal at startup.
    #[error("Failed to load {resource}: {reason}")]
    ConfigLoad { resource: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    /// A call into the deep normalizer or abbreviation tagger failed.
    #[error("External model '{model}' failed: {reason}")]
    ExternalModel { model: String, reason: String },

    #[error("External model '{model}' timed out after {timeout_ms}ms")]
    Timeout { model: String, timeout_ms: u64 },

    #[error("Tokenization error: {0}")]
    Tokenization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Result type for voicenorm operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a resource load failure
    pub fn config_load(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::ConfigLoad {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// Whether the pipeline may continue with rule-only stages after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::ExternalModel { .. } | Error::Timeout { .. })
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidFormat(err.to_string())
    }
}
