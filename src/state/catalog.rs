//! Catalog Store - The item snapshot and its one-time load.
//!
//! The snapshot starts empty. `load()` asks the [`CatalogSource`] for items,
//! validates them and publishes them as a single new snapshot.
//!
//! # Load rules
//!
//! - After a successful load every further `load()` returns the cached
//!   snapshot without fetching.
//! - Callers that arrive while a fetch is outstanding await that same fetch.
//!   No second request is ever issued concurrently.
//! - A failed load leaves the snapshot as it was and clears the in-flight
//!   slot, so a later call may try again.
//!
//! While a load is suspended, readers keep seeing the previous snapshot.
//!
//! # Example
//!
//! ```ignore
//! use spark_catalog::{CatalogStore, JsonFileSource};
//!
//! let catalog = CatalogStore::new(JsonFileSource::new("assets/products.json"));
//! let items = catalog.load().await?;
//! let laptop = catalog.get_by_id("42").await?;
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use futures::future::{FutureExt, LocalBoxFuture, Shared};

use crate::error::FetchError;
use crate::reactive::{Observable, Unsubscribe};
use crate::source::CatalogSource;
use crate::types::Item;

type LoadResult = Result<Rc<Vec<Item>>, FetchError>;
type InFlight = Shared<LocalBoxFuture<'static, LoadResult>>;

struct CatalogInner {
    source: Rc<dyn CatalogSource>,
    snapshot: Observable<Vec<Item>>,
    loaded: Cell<bool>,
    in_flight: RefCell<Option<InFlight>>,
}

/// Shared handle to the catalog snapshot.
#[derive(Clone)]
pub struct CatalogStore {
    inner: Rc<CatalogInner>,
}

impl CatalogStore {
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self::with_source(Rc::new(source))
    }

    pub fn with_source(source: Rc<dyn CatalogSource>) -> Self {
        Self {
            inner: Rc::new(CatalogInner {
                source,
                snapshot: Observable::new(Vec::new()),
                loaded: Cell::new(false),
                in_flight: RefCell::new(None),
            }),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current snapshot. Tracked when read inside a `derived`.
    pub fn current(&self) -> Rc<Vec<Item>> {
        self.inner.snapshot.get()
    }

    pub fn len(&self) -> usize {
        self.inner.snapshot.peek().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.loaded.get()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.in_flight.borrow().is_some()
    }

    /// Look up an item in the current snapshot.
    pub fn find(&self, id: &str) -> Option<Item> {
        if id.is_empty() {
            return None;
        }
        self.inner
            .snapshot
            .peek()
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    pub fn subscribe(&self, listener: impl Fn(&Rc<Vec<Item>>) + 'static) -> Unsubscribe {
        self.inner.snapshot.subscribe(listener)
    }

    pub(crate) fn observable(&self) -> &Observable<Vec<Item>> {
        &self.inner.snapshot
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load the catalog once.
    pub async fn load(&self) -> Result<Rc<Vec<Item>>, FetchError> {
        if self.inner.loaded.get() {
            return Ok(self.inner.snapshot.peek());
        }

        let pending = self.pending_load();
        let result = pending.clone().await;

        let mut slot = self.inner.in_flight.borrow_mut();
        if slot.as_ref().is_some_and(|current| current.ptr_eq(&pending)) {
            *slot = None;
        }

        result
    }

    /// Load if needed, then look up `id`. A missing item is `Ok(None)`.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Item>, FetchError> {
        if id.is_empty() {
            return Ok(None);
        }
        if !self.inner.loaded.get() {
            self.load().await?;
        }
        Ok(self.find(id))
    }

    /// Join the outstanding fetch, or start one.
    fn pending_load(&self) -> InFlight {
        let mut slot = self.inner.in_flight.borrow_mut();
        if let Some(pending) = slot.as_ref() {
            return pending.clone();
        }

        let source = Rc::clone(&self.inner.source);
        let store: Weak<CatalogInner> = Rc::downgrade(&self.inner);

        let fetch: LocalBoxFuture<'static, LoadResult> = async move {
            let label = source.describe();
            let result = match source.fetch().await {
                Ok(items) => validate(&items).map(|()| Rc::new(items)),
                Err(err) => Err(err),
            };

            match &result {
                Ok(items) => {
                    tracing::info!(source = %label, items = items.len(), "catalog.load");
                    if let Some(inner) = store.upgrade() {
                        inner.loaded.set(true);
                        inner.snapshot.replace(Rc::clone(items));
                    }
                }
                Err(err) => {
                    tracing::warn!(source = %label, %err, "catalog.load_failed");
                }
            }
            result
        }
        .boxed_local();

        let pending = fetch.shared();
        *slot = Some(pending.clone());
        pending
    }
}

/// Check item invariants: unique ids, finite non-negative prices.
fn validate(items: &[Item]) -> Result<(), FetchError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(FetchError::InvalidItem {
                id: item.id.clone(),
                reason: "duplicate id".to_string(),
            });
        }
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(FetchError::InvalidItem {
                id: item.id.clone(),
                reason: format!("price {} is not a non-negative number", item.price),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
