//! Error types.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain or apply a catalog.
///
/// `Clone` because a single in-flight load result is shared by every caller
/// awaiting it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The collaborator could not reach its backing resource.
    #[error("transport error: {0}")]
    Transport(String),
    /// Reading a local catalog file failed.
    #[error("I/O error reading {path}: {message}")]
    Io { path: PathBuf, message: String },
    /// The payload was not a JSON array of items.
    #[error("malformed catalog: {0}")]
    Decode(String),
    /// The payload decoded but breaks an item invariant.
    #[error("invalid item {id}: {reason}")]
    InvalidItem { id: String, reason: String },
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Failure to load a [`PipelineConfig`](crate::config::PipelineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {error}")]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// A file-backed catalog was requested but `catalog_path` is unset.
    #[error("catalog_path is not configured")]
    MissingCatalogPath,
}

/// Failure to write the key-value snapshot.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error writing {path}: {error}")]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}
