//! API server state

use std::sync::Arc;

use crate::catalog::Catalog;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Portfolio content access, shared read-only across requests
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Whether reads are backed by a store rather than fallback data only
    pub fn has_store(&self) -> bool {
        self.catalog.has_store()
    }
}
