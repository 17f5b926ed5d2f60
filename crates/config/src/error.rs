//! Configuration error types.

use std::path::PathBuf;

/// Errors produced while loading or saving a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no configuration file found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("configuration file {} is not readable: {source}", path.display())]
    NotReadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("syntax error in {}: {message}", path.display())]
    Syntax { path: PathBuf, message: String },

    #[error("cannot write configuration file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}
