//! Filter predicate.
//!
//! `passes` is the single rule deciding membership in the filtered view. It
//! checks, in order:
//! 1. category membership (skipped when no category is selected)
//! 2. price within `[price_min, price_max]`, both bounds inclusive
//! 3. age at most 30 days, only when `only_recent` is set
//!
//! The reference time is a parameter; nothing here reads the clock.

use chrono::{DateTime, Utc};

use crate::types::{FilterCriteria, Item};

/// Milliseconds in one day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Items older than this many days are not "recent".
pub const RECENT_WINDOW_DAYS: f64 = 30.0;

/// Fractional age in days of something created at `created_at`.
///
/// Negative for timestamps in the future.
pub fn age_in_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - created_at).num_milliseconds() as f64 / MS_PER_DAY
}

/// Whether `created_at` falls inside the recent window.
pub fn is_recent(created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    age_in_days(created_at, now) <= RECENT_WINDOW_DAYS
}

/// Whether `item` belongs in the filtered view.
pub fn passes(item: &Item, criteria: &FilterCriteria, now: DateTime<Utc>) -> bool {
    if !criteria.categories.is_empty() && !criteria.categories.contains(&item.category) {
        return false;
    }

    if item.price < criteria.price_min || item.price > criteria.price_max {
        return false;
    }

    if criteria.only_recent && !is_recent(item.created_at, now) {
        return false;
    }

    true
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn item(category: &str, price: f64, age_days: i64) -> Item {
        Item {
            id: format!("{category}-{price}"),
            name: "Item".into(),
            category: category.into(),
            price,
            stock: 1,
            created_at: now() - Duration::days(age_days),
        }
    }

    fn criteria() -> FilterCriteria {
        FilterCriteria::default()
    }

    #[test]
    fn test_default_criteria_accepts_in_range_items() {
        assert!(passes(&item("Laptops", 999.0, 400), &criteria(), now()));
    }

    #[test]
    fn test_empty_categories_means_no_restriction() {
        let c = criteria();
        assert!(passes(&item("Laptops", 10.0, 1), &c, now()));
        assert!(passes(&item("Anything", 10.0, 1), &c, now()));
    }

    #[test]
    fn test_category_membership() {
        let mut c = criteria();
        c.categories.insert("Headphones".into());
        c.categories.insert("Accessories".into());

        assert!(passes(&item("Headphones", 10.0, 1), &c, now()));
        assert!(passes(&item("Accessories", 10.0, 1), &c, now()));
        assert!(!passes(&item("Laptops", 10.0, 1), &c, now()));
        // Membership is exact, not case-folded.
        assert!(!passes(&item("headphones", 10.0, 1), &c, now()));
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let mut c = criteria();
        c.price_min = 50.0;
        c.price_max = 150.0;

        assert!(passes(&item("A", 50.0, 1), &c, now()));
        assert!(passes(&item("A", 150.0, 1), &c, now()));
        assert!(!passes(&item("A", 49.99, 1), &c, now()));
        assert!(!passes(&item("A", 150.01, 1), &c, now()));
    }

    #[test]
    fn test_only_recent_window() {
        let mut c = criteria();
        c.only_recent = true;

        assert!(passes(&item("A", 10.0, 0), &c, now()));
        assert!(passes(&item("A", 10.0, 30), &c, now()));
        assert!(!passes(&item("A", 10.0, 31), &c, now()));
    }

    #[test]
    fn test_only_recent_off_ignores_age() {
        assert!(passes(&item("A", 10.0, 10_000), &criteria(), now()));
    }

    #[test]
    fn test_age_uses_exact_day_length() {
        let created = now() - Duration::hours(36);
        assert_eq!(age_in_days(created, now()), 1.5);

        let just_over = now() - Duration::days(30) - Duration::seconds(1);
        assert!(!is_recent(just_over, now()));
    }

    #[test]
    fn test_future_items_are_recent() {
        let created = now() + Duration::days(2);
        assert!(age_in_days(created, now()) < 0.0);
        assert!(is_recent(created, now()));
    }

    #[test]
    fn test_rejects_iff_a_rule_fails() {
        let mut c = criteria();
        c.categories.insert("Laptops".into());
        c.price_min = 100.0;
        c.price_max = 500.0;
        c.only_recent = true;

        for category in ["Laptops", "Tablets"] {
            for price in [99.0, 100.0, 300.0, 500.0, 501.0] {
                for age in [0, 30, 31] {
                    let it = item(category, price, age);
                    let expected = category == "Laptops"
                        && (100.0..=500.0).contains(&price)
                        && age <= 30;
                    assert_eq!(passes(&it, &c, now()), expected, "{category} {price} {age}d");
                }
            }
        }
    }
}
