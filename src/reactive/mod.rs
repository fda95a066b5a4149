//! Reactive primitives.
//!
//! `Observable<T>` is the only mutable cell in the crate. Every store is a thin
//! domain wrapper around one, and the view pipeline reads them through a
//! `spark_signals::derived`.
//!
//! ```text
//! Observable::set → revision signal bump → derived invalidated
//!                 → subscribers called synchronously with the new snapshot
//! ```

pub mod observable;

pub use observable::{Observable, Unsubscribe};
pub(crate) use observable::ListenerSet;
