//! Cart Store - Persisted cart item counter.
//!
//! The count is restored from the `cartCount` key when the store is created
//! and written back after every change.

use std::rc::Rc;

use crate::reactive::{Observable, Unsubscribe};
use crate::source::KeyValueStore;

/// Storage key for the persisted count.
pub const CART_COUNT_KEY: &str = "cartCount";

/// Shared handle to the cart counter.
#[derive(Clone)]
pub struct CartStore {
    count: Observable<u32>,
}

impl CartStore {
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        let initial: u32 = match storage.get(CART_COUNT_KEY) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "cart.ignore_persisted_count");
                0
            }),
            None => 0,
        };

        let count = Observable::new(initial);
        // Lives as long as the observable; never removed.
        let _persist = count.subscribe(move |value| {
            if let Err(err) = storage.set(CART_COUNT_KEY, &value.to_string()) {
                tracing::warn!(%err, "cart.persist_failed");
            }
        });

        Self { count }
    }

    pub fn count(&self) -> u32 {
        *self.count.get()
    }

    pub fn add(&self, quantity: u32) {
        self.count.update(|n| n.saturating_add(quantity));
    }

    /// Remove up to `quantity` items; never drops below zero.
    pub fn remove(&self, quantity: u32) {
        self.count.update(|n| n.saturating_sub(quantity));
    }

    pub fn clear(&self) {
        self.count.set(0);
    }

    pub fn subscribe(&self, listener: impl Fn(&Rc<u32>) + 'static) -> Unsubscribe {
        self.count.subscribe(listener)
    }
}
