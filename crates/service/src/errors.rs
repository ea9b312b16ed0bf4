use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid category: {0}")]
    InvalidCategory(String),
    #[error("missing parameter: {0}")]
    MissingParameter(String),
    #[error("io error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed data in {path:?}: {source}")]
    MalformedStoredData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn missing(what: &str) -> Self { Self::MissingParameter(what.to_string()) }
}

pub type StoreResult<T> = Result<T, StoreError>;
