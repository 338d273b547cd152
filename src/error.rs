use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode JSON: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid config in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("unsupported shell: {0}. Use bash, zsh, or fish.")]
    UnsupportedShell(String),
}

impl QuizError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        QuizError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;
