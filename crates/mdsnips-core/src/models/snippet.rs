use std::fmt;

use serde::{Deserialize, Serialize};

use crate::keys;

/// A stored markdown snippet as seen by readers. Carries no update key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: String,
    pub title: String,
    pub body: String,
    pub create_date: jiff::Timestamp,
}

/// The response to a create: the snippet plus its update key.
///
/// This is the only shape that ever carries the key out of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSnippet {
    #[serde(flatten)]
    pub snippet: Snippet,
    pub update_key: String,
}

/// List and search projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetListItem {
    pub id: String,
    pub title: String,
    pub create_date: jiff::Timestamp,
}

/// The full persisted document, update key included.
#[derive(Clone, PartialEq, Eq)]
pub struct SnippetRecord {
    pub id: String,
    pub title: String,
    pub body: String,
    pub update_key: String,
    pub create_date: jiff::Timestamp,
}

impl SnippetRecord {
    /// Build a new record with freshly derived id and update key, stamped now.
    pub fn generate(title: &str, body: &str) -> Self {
        Self {
            id: keys::snippet_id(title, body),
            title: title.to_string(),
            body: body.to_string(),
            update_key: keys::update_key(body),
            create_date: stamp_now(),
        }
    }

    pub fn to_snippet(&self) -> Snippet {
        Snippet {
            id: self.id.clone(),
            title: self.title.clone(),
            body: self.body.clone(),
            create_date: self.create_date,
        }
    }

    pub fn to_list_item(&self) -> SnippetListItem {
        SnippetListItem {
            id: self.id.clone(),
            title: self.title.clone(),
            create_date: self.create_date,
        }
    }

    pub fn into_created(self) -> CreatedSnippet {
        let snippet = self.to_snippet();
        CreatedSnippet {
            snippet,
            update_key: self.update_key,
        }
    }
}

/// The current time, truncated to the microsecond precision the collection
/// stores, so a freshly created snippet equals its persisted form.
fn stamp_now() -> jiff::Timestamp {
    let now = jiff::Timestamp::now();
    jiff::Timestamp::from_microsecond(now.as_microsecond()).unwrap_or(now)
}

impl fmt::Debug for SnippetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnippetRecord")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("body_len", &self.body.len())
            .field("update_key", &"<redacted>")
            .field("create_date", &self.create_date)
            .finish()
    }
}

/// Create request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewSnippet {
    pub title: String,
    pub body: String,
}

/// Update request body. The key is checked by the access guard before the
/// store ever sees this.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateSnippet {
    pub id: String,
    pub update_key: String,
    pub title: String,
    pub body: String,
}
