//! State Module - Mutable sources feeding the view pipeline
//!
//! Each store is a cheap-clone handle over one or more [`Observable`]s:
//!
//! - **Catalog** - Item snapshot, single-flight async load, lookup by id
//! - **Criteria** - Filter/sort selection with coercing setters
//! - **Pagination** - Page index/size with read-time clamping
//! - **Cart** - Persisted cart item counter
//! - **Session** - Persisted session role
//!
//! [`Observable`]: crate::reactive::Observable

pub mod cart;
pub mod catalog;
pub mod criteria;
pub mod pagination;
pub mod session;

pub use cart::CartStore;
pub use catalog::CatalogStore;
pub use criteria::FilterCriteriaStore;
pub use pagination::{PageWindow, PaginationController};
pub use session::SessionStore;
