use std::time::Duration;

use tracing::warn;

use mdsnips_core::models::search::SearchParams;
use mdsnips_core::models::snippet::{
    CreatedSnippet, NewSnippet, Snippet, SnippetListItem, SnippetRecord, UpdateSnippet,
};

use crate::collection::Collection;
use crate::error::StoreError;
use crate::store::{SnippetStore, MAX_ID_ATTEMPTS};

/// Default bound on a single store operation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// [`SnippetStore`] backed by the Tantivy [`Collection`].
///
/// Each operation runs on the blocking pool under a timeout, so a stalled
/// index cannot hang the caller. A timed-out operation is not cancelled on the
/// blocking pool; its result is discarded.
#[derive(Clone)]
pub struct IndexSnippetStore {
    collection: Collection,
    timeout: Duration,
}

impl IndexSnippetStore {
    pub fn new(collection: Collection) -> Self {
        Self::with_timeout(collection, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(collection: Collection, timeout: Duration) -> Self {
        Self {
            collection,
            timeout,
        }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    async fn run<T, F>(&self, operation: &'static str, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(Collection) -> Result<T, StoreError> + Send + 'static,
    {
        let collection = self.collection.clone();
        let task = tokio::task::spawn_blocking(move || f(collection));

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(StoreError::Task(join_err.to_string())),
            Err(_elapsed) => Err(StoreError::Timeout {
                operation,
                timeout: self.timeout,
            }),
        }
    }
}

#[async_trait::async_trait]
impl SnippetStore for IndexSnippetStore {
    async fn create(&self, new: &NewSnippet) -> Result<CreatedSnippet, StoreError> {
        let title = new.title.clone();
        let body = new.body.clone();

        self.run("create", move |collection| {
            let mut attempt = 1;
            loop {
                let record = SnippetRecord::generate(&title, &body);
                match collection.insert_one(&record) {
                    Ok(()) => return Ok(record.into_created()),
                    Err(StoreError::Conflict { id }) if attempt < MAX_ID_ATTEMPTS => {
                        warn!(id = %id, attempt, "snippet id collision, re-deriving");
                        attempt += 1;
                    }
                    Err(e) => return Err(e),
                }
            }
        })
        .await
    }

    async fn get(&self, id: &str) -> Result<Option<Snippet>, StoreError> {
        let id = id.to_string();
        self.run("get", move |collection| {
            Ok(collection.find_one(&id)?.map(|r| r.to_snippet()))
        })
        .await
    }

    async fn list_all(&self) -> Result<Vec<SnippetListItem>, StoreError> {
        self.run("list_all", |collection| {
            Ok(collection
                .find_all()?
                .iter()
                .map(SnippetRecord::to_list_item)
                .collect())
        })
        .await
    }

    async fn search(&self, params: &SearchParams) -> Result<Vec<SnippetListItem>, StoreError> {
        let params = params.clone();
        self.run("search", move |collection| {
            let records = collection.find_many(
                params.text_query(),
                params.sort_by,
                params.skip,
                params.limit,
            )?;
            Ok(records.iter().map(SnippetRecord::to_list_item).collect())
        })
        .await
    }

    async fn update(&self, patch: &UpdateSnippet) -> Result<Snippet, StoreError> {
        let patch = patch.clone();
        self.run("update", move |collection| {
            collection
                .update_one(&patch.id, &patch.title, &patch.body)?
                .map(|r| r.to_snippet())
                .ok_or(StoreError::NotFound { id: patch.id })
        })
        .await
    }

    async fn delete(&self, id: &str, update_key: &str) -> Result<bool, StoreError> {
        let id = id.to_string();
        let update_key = update_key.to_string();
        self.run("delete", move |collection| {
            collection.delete_one(&id, &update_key)
        })
        .await
    }

    async fn find_update_key(&self, id: &str) -> Result<Option<String>, StoreError> {
        let id = id.to_string();
        self.run("find_update_key", move |collection| {
            collection.find_update_key(&id)
        })
        .await
    }

    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        self.run("ensure_indexes", |collection| collection.ensure_indexes())
            .await
    }
}
