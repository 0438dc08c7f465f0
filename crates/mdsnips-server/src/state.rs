use std::sync::Arc;

use mdsnips_store::{AccessGuard, KeyGuard, SnippetStore};

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SnippetStore>,
    pub guard: Arc<dyn AccessGuard>,
}

impl AppState {
    /// State whose guard checks keys against `store`.
    pub fn new(store: Arc<dyn SnippetStore>) -> Self {
        let guard = Arc::new(KeyGuard::new(Arc::clone(&store)));
        Self { store, guard }
    }
}
