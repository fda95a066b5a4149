//! Reactive Pipeline
//!
//! Connects the mutable stores to the view a consumer renders.
//!
//! # Pipeline Architecture
//!
//! ```text
//! CatalogStore ─┐
//! CriteriaStore ├─▶ viewDerived ─▶ CatalogView subscribers
//! Pagination ───┤
//! reference now ┘
//! ```
//!
//! ## Data Flow
//!
//! 1. **compute_view** - pure: filter, stable sort, count, slice the page
//! 2. **viewDerived** - a `derived` over the four inputs; cached until one of
//!    them publishes
//! 3. **CatalogView** - consumer façade; pushes a fresh view to its
//!    subscribers after every upstream emission
//!
//! ## Key Design Principles
//!
//! - **Full recompute**: every change rebuilds the whole `DerivedView`
//! - **No coupling between stores**: a criteria change never writes the page
//!   index; the page is clamped when it is read

pub mod catalog_view;
pub mod view_derived;

pub use catalog_view::CatalogView;
pub use view_derived::{ViewInputs, ViewReader, compute_view, create_view_derived};
