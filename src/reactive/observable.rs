//! Observable - Snapshot holder with get/set/subscribe.
//!
//! An `Observable<T>` owns an immutable `Rc<T>` snapshot. Writers replace the
//! snapshot wholesale; readers never see a half-updated value.
//!
//! Two propagation paths hang off every write:
//! - a `spark_signals::Signal<u64>` revision, so `derived` computations that
//!   called [`Observable::get`] are invalidated
//! - a listener list, called synchronously in registration order
//!
//! The revision always increases, so writing an equal value still propagates.
//! Consumers see every intermediate snapshot.
//!
//! # Example
//!
//! ```ignore
//! use spark_catalog::reactive::Observable;
//!
//! let count = Observable::new(0u32);
//! let stop = count.subscribe(|value| println!("count = {value}"));
//! count.set(1);
//! count.update(|n| n + 1);
//! stop();
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use spark_signals::{Signal, signal};

/// Cleanup returned by `subscribe`. Calling it removes the listener.
pub type Unsubscribe = Box<dyn FnOnce()>;

type Listener<T> = Rc<dyn Fn(&Rc<T>)>;

// =============================================================================
// Listener Set
// =============================================================================

/// Ordered listener registry with id-based removal.
pub(crate) struct ListenerSet<T: 'static> {
    entries: RefCell<Vec<(usize, Listener<T>)>>,
    next_id: Cell<usize>,
}

impl<T: 'static> ListenerSet<T> {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self {
            entries: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        })
    }

    /// Register a listener. The returned cleanup holds only a weak reference.
    pub(crate) fn add(self: &Rc<Self>, listener: Listener<T>) -> Unsubscribe {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, listener));
        tracing::trace!(listener = id, total = self.len(), "observable.subscribe");

        let weak = Rc::downgrade(self);
        Box::new(move || {
            if let Some(set) = weak.upgrade() {
                set.entries.borrow_mut().retain(|(entry_id, _)| *entry_id != id);
                tracing::trace!(listener = id, total = set.len(), "observable.unsubscribe");
            }
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Call every listener with `value`.
    ///
    /// The list is copied first so listeners may subscribe, unsubscribe or
    /// write back while being notified.
    pub(crate) fn notify(&self, value: &Rc<T>) {
        let listeners: Vec<Listener<T>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(value);
        }
    }
}

// =============================================================================
// Observable
// =============================================================================

struct Inner<T: 'static> {
    value: RefCell<Rc<T>>,
    version: Cell<u64>,
    revision: Signal<u64>,
    listeners: Rc<ListenerSet<T>>,
}

/// Shared, reactive snapshot cell.
///
/// Cloning the handle shares the cell.
pub struct Observable<T: 'static> {
    inner: Rc<Inner<T>>,
}

impl<T: 'static> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.inner.value.borrow())
            .field("revision", &self.inner.version.get())
            .finish()
    }
}

impl<T: Default + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self::from_rc(Rc::new(value))
    }

    pub fn from_rc(value: Rc<T>) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                version: Cell::new(0),
                revision: signal(0u64),
                listeners: ListenerSet::new(),
            }),
        }
    }

    /// Current snapshot.
    ///
    /// Inside a `derived` computation this registers a dependency.
    pub fn get(&self) -> Rc<T> {
        let _ = self.inner.revision.get();
        self.peek()
    }

    /// Current snapshot without registering a dependency.
    pub fn peek(&self) -> Rc<T> {
        Rc::clone(&self.inner.value.borrow())
    }

    /// Number of writes since creation.
    pub fn revision(&self) -> u64 {
        self.inner.version.get()
    }

    /// Publish a new snapshot.
    pub fn set(&self, value: T) {
        self.replace(Rc::new(value));
    }

    /// Publish an already shared snapshot.
    pub fn replace(&self, value: Rc<T>) {
        *self.inner.value.borrow_mut() = Rc::clone(&value);

        let next = self.inner.version.get() + 1;
        self.inner.version.set(next);
        self.inner.revision.set(next);

        self.inner.listeners.notify(&value);
    }

    /// Publish a snapshot computed from the current one.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.peek());
        self.set(next);
    }

    /// Register a listener called after every write.
    pub fn subscribe(&self, listener: impl Fn(&Rc<T>) + 'static) -> Unsubscribe {
        self.inner.listeners.add(Rc::new(listener))
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.len()
    }
}

// =============================================================================
// Tests
// =============================================================================
