//! In-memory [`SnippetStore`] for tests and local experiments.

use std::collections::HashSet;

use tokio::sync::RwLock;

use mdsnips_core::models::search::SearchParams;
use mdsnips_core::models::snippet::{
    CreatedSnippet, NewSnippet, Snippet, SnippetListItem, SnippetRecord, UpdateSnippet,
};

use crate::error::StoreError;
use crate::store::{SnippetStore, MAX_ID_ATTEMPTS};

/// Snippets held in a vector in insertion order.
///
/// Text search matches when any lowercase word of the query appears as a
/// word of the title or body.
#[derive(Default)]
pub struct MemorySnippetStore {
    records: RwLock<Vec<SnippetRecord>>,
}

impl MemorySnippetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

fn matches(record: &SnippetRecord, terms: &HashSet<String>) -> bool {
    words(&record.title)
        .chain(words(&record.body))
        .any(|w| terms.contains(&w))
}

#[async_trait::async_trait]
impl SnippetStore for MemorySnippetStore {
    async fn create(&self, new: &NewSnippet) -> Result<CreatedSnippet, StoreError> {
        let mut records = self.records.write().await;

        let mut attempt = 1;
        loop {
            let record = SnippetRecord::generate(&new.title, &new.body);
            if !records.iter().any(|r| r.id == record.id) {
                records.push(record.clone());
                return Ok(record.into_created());
            }
            if attempt >= MAX_ID_ATTEMPTS {
                return Err(StoreError::Conflict { id: record.id });
            }
            attempt += 1;
        }
    }

    async fn get(&self, id: &str) -> Result<Option<Snippet>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).map(|r| r.to_snippet()))
    }

    async fn list_all(&self) -> Result<Vec<SnippetListItem>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().map(SnippetRecord::to_list_item).collect())
    }

    async fn search(&self, params: &SearchParams) -> Result<Vec<SnippetListItem>, StoreError> {
        let records = self.records.read().await;
        let terms: Option<HashSet<String>> = params.text_query().map(|t| words(t).collect());

        // Insertion index breaks creation-date ties so ASC and DESC stay
        // exact reversals of each other.
        let mut hits: Vec<(usize, &SnippetRecord)> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| terms.as_ref().is_none_or(|t| matches(r, t)))
            .collect();
        hits.sort_by_key(|(seq, r)| (r.create_date, *seq));
        if params.sort_by.is_descending() {
            hits.reverse();
        }

        Ok(hits
            .into_iter()
            .skip(params.skip)
            .take(params.limit)
            .map(|(_, r)| r.to_list_item())
            .collect())
    }

    async fn update(&self, patch: &UpdateSnippet) -> Result<Snippet, StoreError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == patch.id)
            .ok_or_else(|| StoreError::NotFound {
                id: patch.id.clone(),
            })?;

        record.title = patch.title.clone();
        record.body = patch.body.clone();
        Ok(record.to_snippet())
    }

    async fn delete(&self, id: &str, update_key: &str) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| !(r.id == id && r.update_key == update_key));
        Ok(records.len() < before)
    }

    async fn find_update_key(&self, id: &str) -> Result<Option<String>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.update_key.clone()))
    }

    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
