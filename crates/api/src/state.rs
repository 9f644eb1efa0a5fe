//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::ListStore;
use crate::middleware::IdentityProvider;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and gives handlers the
/// injected document store and identity provider.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn ListStore>,
    identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `store` - Document store holding the lists
    /// * `identity` - Resolves the caller identity for each request
    #[must_use]
    pub fn new(store: Arc<dyn ListStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store, identity }),
        }
    }

    /// Get a reference to the document store.
    #[must_use]
    pub fn store(&self) -> &dyn ListStore {
        self.inner.store.as_ref()
    }

    /// Get a reference to the identity provider.
    #[must_use]
    pub fn identity(&self) -> &dyn IdentityProvider {
        self.inner.identity.as_ref()
    }
}
