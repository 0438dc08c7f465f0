//! The `SnippetStore` trait that backends implement.

use mdsnips_core::models::search::SearchParams;
use mdsnips_core::models::snippet::{
    CreatedSnippet, NewSnippet, Snippet, SnippetListItem, UpdateSnippet,
};

use crate::error::StoreError;

/// How many times create re-derives the id after a collision before giving up.
pub const MAX_ID_ATTEMPTS: usize = 3;

/// Durable CRUD and search over snippets.
///
/// The update key leaves a store in exactly two ways: inside the
/// [`CreatedSnippet`] returned by `create`, and through `find_update_key`,
/// which exists for the access guard.
#[async_trait::async_trait]
pub trait SnippetStore: Send + Sync {
    /// Persist a new snippet with freshly derived id and update key.
    async fn create(&self, new: &NewSnippet) -> Result<CreatedSnippet, StoreError>;

    /// Fetch a snippet by id. A missing id is `Ok(None)`, not an error.
    async fn get(&self, id: &str) -> Result<Option<Snippet>, StoreError>;

    /// Projections of every snippet, in whatever order the backend yields.
    #[deprecated(note = "use `search`")]
    async fn list_all(&self) -> Result<Vec<SnippetListItem>, StoreError>;

    /// Text search with sort and offset pagination.
    async fn search(&self, params: &SearchParams) -> Result<Vec<SnippetListItem>, StoreError>;

    /// Overwrite title and body. Does not check the update key; callers must
    /// authorize first.
    async fn update(&self, patch: &UpdateSnippet) -> Result<Snippet, StoreError>;

    /// Permanently remove a snippet if `update_key` matches the stored key.
    /// Returns whether a snippet was removed.
    async fn delete(&self, id: &str, update_key: &str) -> Result<bool, StoreError>;

    /// The stored update key for `id`, if the snippet exists.
    async fn find_update_key(&self, id: &str) -> Result<Option<String>, StoreError>;

    /// Create or verify the collection's indexes. Idempotent.
    async fn ensure_indexes(&self) -> Result<(), StoreError>;
}
