//! Catalog sources.
//!
//! A `CatalogSource` produces the full item list in one shot. The catalog
//! store calls it at most once per successful load. Retry policy, if any,
//! belongs to the source.
//!
//! The wire shape is a JSON array of objects with the fields
//! `id, name, category, price, stock, createdAt`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::FetchError;
use crate::types::Item;

/// Fetches the complete catalog.
///
/// Futures are `?Send`: the pipeline is single-threaded and holds `Rc`s.
#[async_trait(?Send)]
pub trait CatalogSource {
    async fn fetch(&self) -> Result<Vec<Item>, FetchError>;

    /// Short description used in log fields.
    fn describe(&self) -> String {
        "catalog".to_string()
    }
}

/// Decode a JSON array of items.
pub fn decode_catalog(json: &str) -> Result<Vec<Item>, FetchError> {
    Ok(serde_json::from_str(json)?)
}

// =============================================================================
// JSON file
// =============================================================================

/// Reads a static JSON catalog from disk.
///
/// Uses `tokio::fs`, so `fetch` must run inside a Tokio runtime.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait(?Send)]
impl CatalogSource for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<Item>, FetchError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| FetchError::Io {
                path: self.path.clone(),
                message: err.to_string(),
            })?;
        decode_catalog(&text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// =============================================================================
// In-memory
// =============================================================================

#[derive(Debug, Clone)]
enum Payload {
    Items(Vec<Item>),
    Json(String),
    Fail(FetchError),
}

/// Serves a fixed payload. Handy for fixtures and embedded catalogs.
#[derive(Debug, Clone)]
pub struct StaticSource {
    payload: Payload,
}

impl StaticSource {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            payload: Payload::Items(items),
        }
    }

    /// Decode `json` on every fetch.
    pub fn from_json(json: impl Into<String>) -> Self {
        Self {
            payload: Payload::Json(json.into()),
        }
    }

    /// Always fail with `error`.
    pub fn failing(error: FetchError) -> Self {
        Self {
            payload: Payload::Fail(error),
        }
    }
}

#[async_trait(?Send)]
impl CatalogSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<Item>, FetchError> {
        match &self.payload {
            Payload::Items(items) => Ok(items.clone()),
            Payload::Json(json) => decode_catalog(json),
            Payload::Fail(error) => Err(error.clone()),
        }
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

// =============================================================================
// Tests
// =============================================================================
