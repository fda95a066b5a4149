//! Filter Criteria Store - The user's filter and sort selection.
//!
//! Every mutator publishes a complete new [`FilterCriteria`] snapshot
//! synchronously, so subscribers observe each intermediate state.
//!
//! Numeric input is never rejected; it is coerced:
//! - min: NaN/infinite or negative → 0
//! - max: NaN/infinite → keep the previous max
//! - min above max → max is raised to min

use std::collections::BTreeSet;
use std::rc::Rc;

use crate::reactive::{Observable, Unsubscribe};
use crate::types::{FilterCriteria, SortKey};

/// Shared handle to the current criteria.
#[derive(Clone, Default)]
pub struct FilterCriteriaStore {
    criteria: Observable<FilterCriteria>,
}

impl FilterCriteriaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_criteria(criteria: FilterCriteria) -> Self {
        Self {
            criteria: Observable::new(criteria),
        }
    }

    /// Current snapshot. Tracked when read inside a `derived`.
    pub fn current(&self) -> Rc<FilterCriteria> {
        self.criteria.get()
    }

    pub fn subscribe(&self, listener: impl Fn(&Rc<FilterCriteria>) + 'static) -> Unsubscribe {
        self.criteria.subscribe(listener)
    }

    pub(crate) fn observable(&self) -> &Observable<FilterCriteria> {
        &self.criteria
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Replace the whole selection at once.
    pub fn apply(&self, criteria: FilterCriteria) {
        let previous_max = self.criteria.peek().price_max;
        let (price_min, price_max) =
            coerce_price_range(criteria.price_min, criteria.price_max, previous_max);
        self.criteria.set(FilterCriteria {
            price_min,
            price_max,
            ..criteria
        });
    }

    pub fn set_categories<I, S>(&self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories: BTreeSet<String> = categories.into_iter().map(Into::into).collect();
        self.criteria.update(|c| FilterCriteria {
            categories,
            ..c.clone()
        });
    }

    /// Add `category` if absent, remove it if present.
    pub fn toggle_category(&self, category: &str) {
        self.criteria.update(|c| {
            let mut categories = c.categories.clone();
            if !categories.remove(category) {
                categories.insert(category.to_string());
            }
            FilterCriteria {
                categories,
                ..c.clone()
            }
        });
    }

    pub fn set_price_range(&self, min: f64, max: f64) {
        self.criteria.update(|c| {
            let (price_min, price_max) = coerce_price_range(min, max, c.price_max);
            FilterCriteria {
                price_min,
                price_max,
                ..c.clone()
            }
        });
    }

    pub fn set_price_min(&self, min: f64) {
        let max = self.criteria.peek().price_max;
        self.set_price_range(min, max);
    }

    pub fn set_price_max(&self, max: f64) {
        let min = self.criteria.peek().price_min;
        self.set_price_range(min, max);
    }

    /// Set the price range from raw text fields.
    pub fn set_price_range_input(&self, min: &str, max: &str) {
        self.set_price_range(parse_number(min), parse_number(max));
    }

    pub fn set_only_recent(&self, only_recent: bool) {
        self.criteria.update(|c| FilterCriteria {
            only_recent,
            ..c.clone()
        });
    }

    pub fn toggle_only_recent(&self) {
        let next = !self.criteria.peek().only_recent;
        self.set_only_recent(next);
    }

    pub fn set_sort_key(&self, sort_key: SortKey) {
        self.criteria.update(|c| FilterCriteria {
            sort_key,
            ..c.clone()
        });
    }

    /// Set the sort key from its selector value (`"price-asc"` etc.).
    pub fn set_sort_value(&self, value: &str) {
        self.set_sort_key(SortKey::from_value(value));
    }

    /// Restore the defaults.
    pub fn reset(&self) {
        self.criteria.set(FilterCriteria::default());
    }
}

/// Parse user text as a number; anything unparsable becomes NaN.
fn parse_number(text: &str) -> f64 {
    text.trim().parse().unwrap_or(f64::NAN)
}

fn coerce_price_range(min: f64, max: f64, previous_max: f64) -> (f64, f64) {
    let min = if min.is_finite() && min > 0.0 { min } else { 0.0 };
    let max = if max.is_finite() { max } else { previous_max };
    (min, max.max(min))
}

// =============================================================================
// Tests
// =============================================================================
