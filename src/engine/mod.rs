//! Catalog Engine - Pure filtering and ordering rules.
//!
//! Nothing in here touches reactive state. Both engines are plain functions
//! over item slices so the pipeline can call them from inside a `derived`
//! and tests can call them directly.
//!
//! - Predicate: does an item pass the current criteria at time `now`
//! - Sort: comparator selection and a stable in-place sort
//!
//! ```text
//! catalog ──filter(passes)──▶ matches ──sort_items(sort_key)──▶ filtered
//! ```

pub mod predicate;
pub mod sort;

pub use predicate::{MS_PER_DAY, RECENT_WINDOW_DAYS, age_in_days, is_recent, passes};
pub use sort::{Comparator, comparator, sort_items};
