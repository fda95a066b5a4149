//! Core types for spark-catalog.
//!
//! These types flow through the reactive pipeline: raw `Item`s come out of the
//! catalog store, `FilterCriteria` and `PaginationState` are the user-facing
//! state, and `DerivedView` is what a view finally renders.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::predicate;

// =============================================================================
// Defaults
// =============================================================================

/// Lower price bound of the default criteria.
pub const DEFAULT_PRICE_MIN: f64 = 0.0;

/// Upper price bound of the default criteria.
pub const DEFAULT_PRICE_MAX: f64 = 2000.0;

/// Items shown per page until the user picks another size.
pub const DEFAULT_PAGE_SIZE: usize = 16;

// =============================================================================
// Item
// =============================================================================

/// A catalog entry.
///
/// Immutable once loaded; a reload replaces the whole catalog snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
    /// RFC 3339. Values without an offset, or date-only values, are read as UTC.
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Whether the item was added within the recent window (30 days).
    pub fn is_new(&self, now: DateTime<Utc>) -> bool {
        predicate::is_recent(self.created_at, now)
    }

    /// Clamp a requested purchase quantity into `[1, stock]`.
    ///
    /// Out-of-stock items clamp to 0.
    pub fn clamp_quantity(&self, quantity: u32) -> u32 {
        quantity.max(1).min(self.stock)
    }
}

mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, de};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse(&text).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {text:?}")))
    }

    fn parse(text: &str) -> Option<DateTime<Utc>> {
        let text = text.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return Some(parsed.with_timezone(&Utc));
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                return Some(naive.and_utc());
            }
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

// =============================================================================
// Sort Key
// =============================================================================

/// Ordering applied to the filtered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    /// Catalog order.
    #[serde(rename = "none")]
    None,
    /// Newest first.
    #[default]
    #[serde(rename = "createdAt-desc")]
    CreatedDesc,
    /// Cheapest first.
    #[serde(rename = "price-asc")]
    PriceAsc,
    /// Most expensive first.
    #[serde(rename = "price-desc")]
    PriceDesc,
}

impl SortKey {
    /// Parse a sort selector value. Unknown values mean no sorting.
    pub fn from_value(value: &str) -> Self {
        match value {
            "createdAt-desc" => Self::CreatedDesc,
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            _ => Self::None,
        }
    }

    /// Selector value for this key.
    pub fn as_value(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::CreatedDesc => "createdAt-desc",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }

    /// Human label, as shown in a sort dropdown.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Catalog Order",
            Self::CreatedDesc => "Newest First",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
        }
    }
}

// =============================================================================
// Filter Criteria
// =============================================================================

/// The user-selected filter and sort configuration.
///
/// Snapshots are immutable; the criteria store publishes a new one per edit.
/// `Default` is the reset state: every category, price `[0, 2000]`, all ages,
/// newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Allowed categories. Empty means no restriction.
    pub categories: BTreeSet<String>,
    pub price_min: f64,
    pub price_max: f64,
    pub only_recent: bool,
    pub sort_key: SortKey,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            categories: BTreeSet::new(),
            price_min: DEFAULT_PRICE_MIN,
            price_max: DEFAULT_PRICE_MAX,
            only_recent: false,
            sort_key: SortKey::CreatedDesc,
        }
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Requested page position. `page_size` is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// =============================================================================
// Derived View
// =============================================================================

/// The filtered, sorted, paginated result a view renders.
///
/// Recomputed from scratch whenever an input changes.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView {
    /// Items passing the criteria, in sort order.
    pub filtered: Vec<Item>,
    /// The visible window of `filtered`.
    pub page: Vec<Item>,
    /// Catalog size before filtering.
    pub total_count: usize,
    /// Always `filtered.len()`.
    pub filtered_count: usize,
    /// Page index actually used for `page`, after clamping.
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for DerivedView {
    fn default() -> Self {
        Self {
            filtered: Vec::new(),
            page: Vec::new(),
            total_count: 0,
            filtered_count: 0,
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl DerivedView {
    /// Number of pages needed to show every filtered item.
    pub fn page_count(&self) -> usize {
        self.filtered_count.div_ceil(self.page_size.max(1))
    }

    /// Short count message for a results header.
    pub fn count_summary(&self) -> String {
        if self.filtered_count == self.total_count {
            format!("(Total {} products)", self.total_count)
        } else {
            format!("{} products filtered", self.filtered_count)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
