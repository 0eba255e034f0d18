//! Error types for carminer

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// carminer errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported attribute '{name}': {kind} attributes cannot be mined")]
    UnsupportedAttribute { name: String, kind: String },

    #[error("Invalid class index: {0}")]
    InvalidClassIndex(String),

    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    #[error("Too many attributes for prior estimation: {count} (max {max})")]
    TooManyAttributes { count: usize, max: usize },

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Mining run cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
