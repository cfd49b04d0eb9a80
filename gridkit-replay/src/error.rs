//! Replay error types.

use std::path::PathBuf;

use gridkit::TableError;
use thiserror::Error;

/// Errors that stop a replay run.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("unknown log level '{0}'")]
    LogLevel(String),

    /// A script step refers to something the page does not have.
    #[error("step {index}: {message}")]
    Step { index: usize, message: String },
}
