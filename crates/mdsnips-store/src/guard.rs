//! Update-key authorization.
//!
//! Possession of a snippet's update key is the only credential the system
//! knows. The guard answers a single yes/no question and never says why.

use std::sync::Arc;

use tracing::warn;

use crate::store::SnippetStore;

/// Decides whether a caller may modify a snippet.
#[async_trait::async_trait]
pub trait AccessGuard: Send + Sync {
    /// True only when `id` exists and `presented_key` equals its stored key.
    ///
    /// An unknown id, a wrong key, and a lookup failure all return `false`.
    async fn authorize(&self, id: &str, presented_key: &str) -> bool;
}

/// [`AccessGuard`] that compares against the key held by a [`SnippetStore`].
pub struct KeyGuard<S: ?Sized> {
    store: Arc<S>,
}

impl<S: SnippetStore + ?Sized> KeyGuard<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<S: SnippetStore + ?Sized> AccessGuard for KeyGuard<S> {
    async fn authorize(&self, id: &str, presented_key: &str) -> bool {
        match self.store.find_update_key(id).await {
            Ok(Some(stored)) => stored.as_bytes() == presented_key.as_bytes(),
            Ok(None) => false,
            Err(e) => {
                warn!(id = %id, error = %e, "update key lookup failed, denying");
                false
            }
        }
    }
}
