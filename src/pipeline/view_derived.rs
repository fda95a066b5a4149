//! View Derived - Reactive view computation.
//!
//! Creates a derived that rebuilds the `DerivedView` whenever:
//! - The catalog snapshot changes
//! - The filter criteria change
//! - The pagination state changes
//! - The reference time changes

use std::rc::Rc;

use chrono::{DateTime, Utc};
use spark_signals::derived;

use crate::engine::{passes, sort_items};
use crate::reactive::Observable;
use crate::state::pagination::page_window;
use crate::state::{CatalogStore, FilterCriteriaStore, PaginationController};
use crate::types::{DerivedView, FilterCriteria, Item, PaginationState};

/// Reads the current view, recomputing only if an input changed.
pub type ViewReader = Rc<dyn Fn() -> Rc<DerivedView>>;

/// Everything the view depends on.
#[derive(Clone)]
pub struct ViewInputs {
    pub catalog: CatalogStore,
    pub criteria: FilterCriteriaStore,
    pub pagination: PaginationController,
    pub now: Observable<DateTime<Utc>>,
}

/// Build the view from plain inputs.
pub fn compute_view(
    catalog: &[Item],
    criteria: &FilterCriteria,
    pagination: PaginationState,
    now: DateTime<Utc>,
) -> DerivedView {
    let mut filtered: Vec<Item> = catalog
        .iter()
        .filter(|item| passes(item, criteria, now))
        .cloned()
        .collect();
    sort_items(&mut filtered, criteria.sort_key);

    let window = page_window(pagination, filtered.len());
    let page = filtered[window.range.clone()].to_vec();

    DerivedView {
        total_count: catalog.len(),
        filtered_count: filtered.len(),
        page_index: window.page_index,
        page_size: window.page_size,
        filtered,
        page,
    }
}

/// Create the view derived.
///
/// The returned reader is cheap to call repeatedly: the computation re-runs
/// only after one of the inputs has published.
pub fn create_view_derived(inputs: &ViewInputs) -> ViewReader {
    let catalog = inputs.catalog.observable().clone();
    let criteria = inputs.criteria.observable().clone();
    let pagination = inputs.pagination.observable().clone();
    let now = inputs.now.clone();

    let view = derived(move || {
        // Each get() registers a dependency.
        let items = catalog.get();
        let criteria = criteria.get();
        let pagination = *pagination.get();
        let now = *now.get();

        let view = compute_view(&items, &criteria, pagination, now);
        tracing::debug!(
            total = view.total_count,
            filtered = view.filtered_count,
            page = view.page_index,
            visible = view.page.len(),
            "catalog_view.recompute"
        );
        Rc::new(view)
    });

    Rc::new(move || view.get())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use futures::executor::block_on;

    use crate::source::StaticSource;
    use crate::types::SortKey;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn item(id: &str, category: &str, price: f64, age_days: i64) -> Item {
        Item {
            id: id.into(),
            name: format!("Item {id}"),
            category: category.into(),
            price,
            stock: 1,
            created_at: now() - Duration::days(age_days),
        }
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    fn inputs(items: Vec<Item>, page_size: usize) -> ViewInputs {
        let catalog = CatalogStore::new(StaticSource::new(items));
        block_on(catalog.load()).unwrap();
        ViewInputs {
            catalog,
            criteria: FilterCriteriaStore::new(),
            pagination: PaginationController::new(page_size),
            now: Observable::new(now()),
        }
    }

    #[test]
    fn test_compute_view_example_scenario() {
        let catalog = vec![
            item("a", "Laptops", 100.0, 5),
            item("b", "Laptops", 50.0, 40),
            item("c", "Laptops", 200.0, 10),
        ];
        let criteria = FilterCriteria {
            price_min: 0.0,
            price_max: 150.0,
            only_recent: true,
            sort_key: SortKey::PriceAsc,
            ..FilterCriteria::default()
        };

        let view = compute_view(&catalog, &criteria, PaginationState::default(), now());

        assert_eq!(ids(&view.filtered), vec!["a"]);
        assert_eq!(view.filtered_count, 1);
        assert_eq!(view.total_count, 3);
        assert_eq!(view.page, view.filtered);
    }

    #[test]
    fn test_compute_view_empty_catalog() {
        let view = compute_view(&[], &FilterCriteria::default(), PaginationState::default(), now());
        assert!(view.filtered.is_empty());
        assert!(view.page.is_empty());
        assert_eq!(view.total_count, 0);
    }

    #[test]
    fn test_compute_view_filtered_is_sorted_subsequence() {
        let catalog = vec![
            item("a", "Laptops", 30.0, 1),
            item("b", "Phones", 10.0, 2),
            item("c", "Laptops", 20.0, 3),
            item("d", "Laptops", 10.0, 4),
        ];
        let mut criteria = FilterCriteria::default();
        criteria.categories.insert("Laptops".into());
        criteria.sort_key = SortKey::PriceAsc;

        let view = compute_view(&catalog, &criteria, PaginationState::default(), now());
        assert_eq!(ids(&view.filtered), vec!["d", "c", "a"]);
    }

    #[test]
    fn test_derived_follows_criteria() {
        let inputs = inputs(
            vec![
                item("a", "Laptops", 100.0, 1),
                item("b", "Phones", 300.0, 2),
                item("c", "Laptops", 900.0, 3),
            ],
            16,
        );
        let read = create_view_derived(&inputs);

        // Default sort is newest first.
        assert_eq!(ids(&read().filtered), vec!["a", "b", "c"]);

        inputs.criteria.set_categories(["Laptops"]);
        assert_eq!(ids(&read().filtered), vec!["a", "c"]);

        inputs.criteria.set_sort_key(SortKey::PriceDesc);
        assert_eq!(ids(&read().filtered), vec!["c", "a"]);

        inputs.criteria.reset();
        assert_eq!(read().filtered_count, 3);
    }

    #[test]
    fn test_derived_is_cached_between_changes() {
        let inputs = inputs(vec![item("a", "Laptops", 1.0, 1)], 16);
        let read = create_view_derived(&inputs);

        let first = read();
        let second = read();
        assert!(Rc::ptr_eq(&first, &second));

        inputs.criteria.set_only_recent(true);
        inputs.criteria.set_only_recent(false);
        assert_eq!(*read(), *first);
    }

    #[test]
    fn test_derived_follows_reference_time() {
        let inputs = inputs(vec![item("a", "Laptops", 1.0, 20)], 16);
        inputs.criteria.set_only_recent(true);
        let read = create_view_derived(&inputs);
        assert_eq!(read().filtered_count, 1);

        inputs.now.set(now() + Duration::days(11));
        assert_eq!(read().filtered_count, 0);
    }

    #[test]
    fn test_derived_pages_and_clamps() {
        let items: Vec<Item> = (0..5).map(|i| item(&format!("p{i}"), "Laptops", 10.0 * i as f64, 1)).collect();
        let inputs = inputs(items, 2);
        inputs.criteria.set_sort_key(SortKey::PriceAsc);
        let read = create_view_derived(&inputs);

        assert_eq!(ids(&read().page), vec!["p0", "p1"]);

        inputs.pagination.on_page_change(2, 2);
        assert_eq!(ids(&read().page), vec!["p4"]);

        inputs.criteria.set_price_range(0.0, 0.0);
        let view = read();
        assert_eq!(view.filtered_count, 1);
        assert_eq!(view.page_index, 0);
        assert_eq!(ids(&view.page), vec!["p0"]);
    }
}
