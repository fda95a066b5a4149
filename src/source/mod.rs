//! External collaborators.
//!
//! - [`catalog_source`]: where catalog items come from (`CatalogSource`)
//! - [`persistence`]: key→string storage for small bits of session state

pub mod catalog_source;
pub mod persistence;

pub use catalog_source::{CatalogSource, JsonFileSource, StaticSource, decode_catalog};
pub use persistence::{JsonFileStore, KeyValueStore, MemoryStore};
