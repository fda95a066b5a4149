//! Session Store - Persisted session role.
//!
//! Only remembers which role the session holds. Verifying who may hold it is
//! somebody else's job.

use std::rc::Rc;

use crate::reactive::{Observable, Unsubscribe};
use crate::source::KeyValueStore;

/// Storage key for the persisted role.
pub const USER_ROLE_KEY: &str = "userRole";

/// Role granting administrative views.
pub const ADMIN_ROLE: &str = "ADMIN";

/// Shared handle to the session role.
#[derive(Clone)]
pub struct SessionStore {
    role: Observable<Option<String>>,
    storage: Rc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        let role = storage.get(USER_ROLE_KEY).filter(|r| !r.is_empty());
        Self {
            role: Observable::new(role),
            storage,
        }
    }

    pub fn role(&self) -> Option<String> {
        (*self.role.get()).clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.role.get().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role.get().as_deref() == Some(ADMIN_ROLE)
    }

    pub fn set_role(&self, role: &str) {
        if let Err(err) = self.storage.set(USER_ROLE_KEY, role) {
            tracing::warn!(%err, "session.persist_failed");
        }
        self.role.set(Some(role.to_string()));
    }

    pub fn clear(&self) {
        if let Err(err) = self.storage.remove(USER_ROLE_KEY) {
            tracing::warn!(%err, "session.persist_failed");
        }
        self.role.set(None);
    }

    pub fn subscribe(&self, listener: impl Fn(&Rc<Option<String>>) + 'static) -> Unsubscribe {
        self.role.subscribe(listener)
    }
}
