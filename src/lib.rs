//! # spark-catalog
//!
//! Reactive catalog pipeline for Rust.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! cached derived computation.
//!
//! ## Architecture
//!
//! Two independent sources, the catalog and the filter criteria, feed one
//! derived view. Pagination state and a reference time are two more inputs.
//! Every input is an [`Observable`] snapshot, replaced wholesale on change.
//!
//! ```text
//! CatalogStore + FilterCriteriaStore + PaginationController + now
//!     → viewDerived (filter → stable sort → count → page slice)
//!     → CatalogView subscribers
//! ```
//!
//! Everything runs on one thread. The only suspension point is
//! [`CatalogStore::load`], which never issues more than one fetch at a time.
//!
//! ## Modules
//!
//! - [`types`] - Item, criteria, pagination and view types
//! - [`reactive`] - `Observable` snapshot cells
//! - [`engine`] - Pure predicate and sort rules
//! - [`state`] - Catalog, criteria, pagination, cart and session stores
//! - [`pipeline`] - View derivation and the `CatalogView` handle
//! - [`source`] - Catalog sources and key-value persistence
//! - [`config`] - TOML configuration
//! - [`error`] - Error types

pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod reactive;
pub mod source;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::PipelineConfig;

pub use error::{ConfigError, FetchError, PersistError};

pub use reactive::{Observable, Unsubscribe};

pub use engine::{age_in_days, comparator, is_recent, passes, sort_items};

pub use state::{
    CartStore, CatalogStore, FilterCriteriaStore, PageWindow, PaginationController, SessionStore,
};

pub use pipeline::{CatalogView, ViewInputs, compute_view, create_view_derived};

pub use source::{
    CatalogSource, JsonFileSource, JsonFileStore, KeyValueStore, MemoryStore, StaticSource,
    decode_catalog,
};
