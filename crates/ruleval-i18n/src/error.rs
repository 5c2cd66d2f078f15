use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("Dictionary decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read dictionary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dictionary: {0}")]
    InvalidDictionary(String),

    #[cfg(feature = "config")]
    #[error("Locale configuration error: {0}")]
    Config(#[from] envy::Error),
}

pub type Result<T> = std::result::Result<T, I18nError>;
