//! Shared application state for the HTTP server.

use std::sync::Arc;

use mutant::service::MutantService;

/// Shared state accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Memoizing classifier backed by the configured verdict store.
    pub service: Arc<MutantService>,
}

impl AppState {
    pub fn new(service: MutantService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
