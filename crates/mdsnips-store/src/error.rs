use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snippet not found: {id}")]
    NotFound { id: String },

    #[error("snippet id already exists: {id}")]
    Conflict { id: String },

    #[error("{operation} timed out after {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    #[error("tantivy error: {0}")]
    Tantivy(#[from] tantivy::TantivyError),

    #[error("failed to open index directory: {0}")]
    OpenDirectory(#[from] tantivy::directory::error::OpenDirectoryError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("index schema is missing {index}")]
    SchemaMismatch { index: String },

    #[error("stored document corrupted: {0}")]
    Corrupted(String),

    #[error("store task failed: {0}")]
    Task(String),
}

impl StoreError {
    /// True for every failure of the backing store itself, as opposed to a
    /// missing target.
    pub fn is_persistence(&self) -> bool {
        !matches!(self, StoreError::NotFound { .. })
    }
}

impl From<mdsnips_core::error::CoreError> for StoreError {
    fn from(e: mdsnips_core::error::CoreError) -> Self {
        StoreError::Corrupted(e.to_string())
    }
}
