//! Sort comparators.
//!
//! Every key sorts with `slice::sort_by`, which is stable: items comparing
//! `Equal` keep their catalog order. `SortKey::None` compares everything as
//! equal, so it is the identity ordering.

use std::cmp::Ordering;

use crate::types::{Item, SortKey};

/// Item ordering function.
pub type Comparator = fn(&Item, &Item) -> Ordering;

fn keep_order(_: &Item, _: &Item) -> Ordering {
    Ordering::Equal
}

fn created_desc(a: &Item, b: &Item) -> Ordering {
    b.created_at.cmp(&a.created_at)
}

fn price_asc(a: &Item, b: &Item) -> Ordering {
    a.price.total_cmp(&b.price)
}

fn price_desc(a: &Item, b: &Item) -> Ordering {
    b.price.total_cmp(&a.price)
}

/// Comparator for `key`.
pub fn comparator(key: SortKey) -> Comparator {
    match key {
        SortKey::None => keep_order,
        SortKey::CreatedDesc => created_desc,
        SortKey::PriceAsc => price_asc,
        SortKey::PriceDesc => price_desc,
    }
}

/// Stable in-place sort of `items` by `key`.
pub fn sort_items(items: &mut [Item], key: SortKey) {
    if key == SortKey::None {
        return;
    }
    items.sort_by(comparator(key));
}

// =============================================================================
// Tests
// =============================================================================
