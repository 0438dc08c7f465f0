use std::sync::Arc;

use mdsnips_core::models::search::SearchParams;
use mdsnips_core::models::snippet::{
    CreatedSnippet, NewSnippet, Snippet, SnippetListItem, UpdateSnippet,
};
use mdsnips_store::{
    AccessGuard, Collection, IndexSnippetStore, KeyGuard, MemorySnippetStore, SnippetStore,
    StoreError,
};

/// A backend whose every call fails, as if the index were unreachable.
struct UnreachableStore;

fn unreachable() -> StoreError {
    StoreError::Task("backend unreachable".to_string())
}

#[async_trait::async_trait]
impl SnippetStore for UnreachableStore {
    async fn create(&self, _new: &NewSnippet) -> Result<CreatedSnippet, StoreError> {
        Err(unreachable())
    }
    async fn get(&self, _id: &str) -> Result<Option<Snippet>, StoreError> {
        Err(unreachable())
    }
    async fn list_all(&self) -> Result<Vec<SnippetListItem>, StoreError> {
        Err(unreachable())
    }
    async fn search(&self, _params: &SearchParams) -> Result<Vec<SnippetListItem>, StoreError> {
        Err(unreachable())
    }
    async fn update(&self, _patch: &UpdateSnippet) -> Result<Snippet, StoreError> {
        Err(unreachable())
    }
    async fn delete(&self, _id: &str, _update_key: &str) -> Result<bool, StoreError> {
        Err(unreachable())
    }
    async fn find_update_key(&self, _id: &str) -> Result<Option<String>, StoreError> {
        Err(unreachable())
    }
    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        Err(unreachable())
    }
}

fn hello() -> NewSnippet {
    NewSnippet {
        title: "Hello".to_string(),
        body: "# Hi".to_string(),
    }
}

#[tokio::test]
async fn correct_key_is_authorized() {
    let store = Arc::new(IndexSnippetStore::new(Collection::open_in_ram().unwrap()));
    let guard = KeyGuard::new(Arc::clone(&store));
    let created = store.create(&hello()).await.unwrap();

    assert!(guard.authorize(&created.snippet.id, &created.update_key).await);
}

#[tokio::test]
async fn wrong_key_and_unknown_id_look_the_same() {
    let store = Arc::new(IndexSnippetStore::new(Collection::open_in_ram().unwrap()));
    let guard = KeyGuard::new(Arc::clone(&store));
    let created = store.create(&hello()).await.unwrap();

    let wrong_key = guard.authorize(&created.snippet.id, "not-the-key").await;
    let unknown_id = guard.authorize("no-such-id", &created.update_key).await;
    assert!(!wrong_key);
    assert_eq!(wrong_key, unknown_id);
}

#[tokio::test]
async fn key_comparison_is_exact() {
    let store = Arc::new(MemorySnippetStore::new());
    let guard = KeyGuard::new(Arc::clone(&store));
    let created = store.create(&hello()).await.unwrap();

    let upper = created.update_key.to_uppercase();
    if upper != created.update_key {
        assert!(!guard.authorize(&created.snippet.id, &upper).await);
    }
    let padded = format!("{} ", created.update_key);
    assert!(!guard.authorize(&created.snippet.id, &padded).await);
    assert!(!guard.authorize(&created.snippet.id, "").await);
}

#[tokio::test]
async fn lookup_failure_fails_closed() {
    let store: Arc<dyn SnippetStore> = Arc::new(UnreachableStore);
    let guard = KeyGuard::new(store);
    assert!(!guard.authorize("any", "key").await);
}

#[tokio::test]
async fn rejected_update_leaves_document_untouched() {
    let store = Arc::new(IndexSnippetStore::new(Collection::open_in_ram().unwrap()));
    let guard = KeyGuard::new(Arc::clone(&store));
    let created = store.create(&hello()).await.unwrap();
    let before = store.get(&created.snippet.id).await.unwrap().unwrap();

    let patch = UpdateSnippet {
        id: created.snippet.id.clone(),
        update_key: "forged".to_string(),
        title: "Defaced".to_string(),
        body: "gone".to_string(),
    };
    if guard.authorize(&patch.id, &patch.update_key).await {
        store.update(&patch).await.unwrap();
    }

    let after = store.get(&created.snippet.id).await.unwrap().unwrap();
    assert_eq!(before, after);
}
