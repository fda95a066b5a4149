//! Pipeline configuration.
//!
//! Loaded from TOML. Every field is optional:
//!
//! ```toml
//! page_size = 24
//! catalog_path = "assets/mock-data/products.json"
//! storage_path = "state.json"
//! ```

use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::source::{JsonFileSource, JsonFileStore, KeyValueStore, MemoryStore};
use crate::types::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Items per page before the user changes it. Zero is treated as 1.
    pub page_size: usize,
    /// JSON catalog read by [`JsonFileSource`](crate::source::JsonFileSource).
    pub catalog_path: Option<PathBuf>,
    /// Key-value snapshot used by [`JsonFileStore`](crate::source::JsonFileStore).
    pub storage_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            catalog_path: None,
            storage_path: None,
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        Self::from_toml_str(&text)
    }

    /// `page_size` with the zero case folded to 1.
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Catalog source reading `catalog_path`.
    pub fn catalog_source(&self) -> Result<JsonFileSource, ConfigError> {
        self.catalog_path
            .as_ref()
            .map(|path| JsonFileSource::new(path.clone()))
            .ok_or(ConfigError::MissingCatalogPath)
    }

    /// Key-value store at `storage_path`, or an in-memory one when unset.
    pub fn open_storage(&self) -> Rc<dyn KeyValueStore> {
        match &self.storage_path {
            Some(path) => Rc::new(JsonFileStore::open(path.clone())),
            None => Rc::new(MemoryStore::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = PipelineConfig::from_toml_str("").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.page_size, 16);
    }

    #[test]
    fn test_full_config() {
        let config = PipelineConfig::from_toml_str(
            r#"
            page_size = 24
            catalog_path = "assets/products.json"
            storage_path = "state.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.page_size, 24);
        assert_eq!(config.catalog_path, Some(PathBuf::from("assets/products.json")));
        assert_eq!(config.storage_path, Some(PathBuf::from("state.json")));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = PipelineConfig::from_toml_str("page_sise = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_page_size() {
        let config = PipelineConfig::from_toml_str("page_size = 0").unwrap();
        assert_eq!(config.effective_page_size(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, "page_size = 8\n").unwrap();

        assert_eq!(PipelineConfig::load(&path).unwrap().page_size, 8);

        let missing = PipelineConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }

    #[test]
    fn test_catalog_source_needs_path() {
        let err = PipelineConfig::default().catalog_source().unwrap_err();
        assert!(matches!(err, ConfigError::MissingCatalogPath));

        let config = PipelineConfig::from_toml_str(r#"catalog_path = "assets/products.json""#).unwrap();
        assert_eq!(config.catalog_source().unwrap().path(), Path::new("assets/products.json"));
    }

    #[test]
    fn test_open_storage() {
        let memory = PipelineConfig::default().open_storage();
        memory.set("cartCount", "2").unwrap();
        assert_eq!(memory.get("cartCount").as_deref(), Some("2"));

        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            storage_path: Some(dir.path().join("state.json")),
            ..PipelineConfig::default()
        };
        config.open_storage().set("userRole", "ADMIN").unwrap();
        assert_eq!(config.open_storage().get("userRole").as_deref(), Some("ADMIN"));
    }
}
