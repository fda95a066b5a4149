//! Catalog View - The consumer-facing handle.
//!
//! A `CatalogView` owns the view derived and the upstream subscriptions that
//! push fresh views to its subscribers. Consumers can:
//! - read the current [`DerivedView`]
//! - subscribe to view changes
//! - drive the criteria store and the pagination controller
//!
//! # Example
//!
//! ```ignore
//! use spark_catalog::{CatalogView, PipelineConfig};
//!
//! let config = PipelineConfig::load("catalog.toml")?;
//! let view = CatalogView::open(&config)?;
//!
//! let _stop = view.subscribe(|v| println!("{}", v.count_summary()));
//! view.load().await?;
//! view.criteria().set_sort_value("price-asc");
//! view.pagination().on_page_change(1, 16);
//! ```

use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::config::PipelineConfig;
use crate::error::{ConfigError, FetchError};
use crate::reactive::{ListenerSet, Observable, Unsubscribe};
use crate::state::{CatalogStore, FilterCriteriaStore, PaginationController};
use crate::types::DerivedView;

use super::view_derived::{ViewInputs, ViewReader, create_view_derived};

// =============================================================================
// Catalog View
// =============================================================================

/// Derived view over a catalog, criteria and pagination.
///
/// Dropping the handle detaches it from the stores.
pub struct CatalogView {
    inputs: ViewInputs,
    read: ViewReader,
    subscribers: Rc<ListenerSet<DerivedView>>,
    upstream: Vec<Unsubscribe>,
}

impl CatalogView {
    /// Wire a view over existing stores, evaluated at time `now`.
    pub fn new(
        catalog: CatalogStore,
        criteria: FilterCriteriaStore,
        pagination: PaginationController,
        now: DateTime<Utc>,
    ) -> Self {
        let inputs = ViewInputs {
            catalog,
            criteria,
            pagination,
            now: Observable::new(now),
        };
        let read = create_view_derived(&inputs);
        let subscribers = ListenerSet::new();

        let upstream = vec![
            forward(inputs.catalog.observable(), &read, &subscribers),
            forward(inputs.criteria.observable(), &read, &subscribers),
            forward(inputs.pagination.observable(), &read, &subscribers),
            forward(&inputs.now, &read, &subscribers),
        ];

        Self {
            inputs,
            read,
            subscribers,
            upstream,
        }
    }

    /// Fresh criteria and pagination stores, evaluated at the current time.
    pub fn from_config(catalog: CatalogStore, config: &PipelineConfig) -> Self {
        Self::new(
            catalog,
            FilterCriteriaStore::new(),
            PaginationController::new(config.effective_page_size()),
            Utc::now(),
        )
    }

    /// View over the JSON catalog at `config.catalog_path`.
    pub fn open(config: &PipelineConfig) -> Result<Self, ConfigError> {
        let catalog = CatalogStore::new(config.catalog_source()?);
        Ok(Self::from_config(catalog, config))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current view.
    pub fn view(&self) -> Rc<DerivedView> {
        (self.read)()
    }

    /// Called with a recomputed view after every upstream emission.
    pub fn subscribe(&self, listener: impl Fn(&Rc<DerivedView>) + 'static) -> Unsubscribe {
        self.subscribers.add(Rc::new(listener))
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.inputs.catalog
    }

    pub fn criteria(&self) -> &FilterCriteriaStore {
        &self.inputs.criteria
    }

    pub fn pagination(&self) -> &PaginationController {
        &self.inputs.pagination
    }

    /// Reference time used by the recent-items filter.
    pub fn now(&self) -> DateTime<Utc> {
        *self.inputs.now.peek()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Load the catalog (once) and return the resulting view.
    pub async fn load(&self) -> Result<Rc<DerivedView>, FetchError> {
        self.inputs.catalog.load().await?;
        Ok(self.view())
    }

    pub fn set_now(&self, now: DateTime<Utc>) {
        self.inputs.now.set(now);
    }

    /// Move the reference time to the wall clock.
    pub fn refresh_now(&self) {
        self.set_now(Utc::now());
    }

    /// Jump back to the first page, keeping the page size.
    pub fn reset_page(&self) {
        self.inputs.pagination.first_page();
    }

    /// Store the clamped page index for the current result size.
    pub fn clamp_page(&self) -> bool {
        let filtered = self.view().filtered_count;
        self.inputs.pagination.clamp(filtered)
    }
}

impl Drop for CatalogView {
    fn drop(&mut self) {
        for stop in self.upstream.drain(..) {
            stop();
        }
    }
}

/// Push a fresh view to `subscribers` whenever `source` publishes.
fn forward<T: 'static>(
    source: &Observable<T>,
    read: &ViewReader,
    subscribers: &Rc<ListenerSet<DerivedView>>,
) -> Unsubscribe {
    let read = Rc::clone(read);
    let subscribers = Rc::clone(subscribers);
    source.subscribe(move |_| {
        if subscribers.is_empty() {
            return;
        }
        let view = read();
        subscribers.notify(&view);
    })
}

// =============================================================================
// Tests
// =============================================================================
