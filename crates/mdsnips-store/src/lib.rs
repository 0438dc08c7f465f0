//! mdsnips-store
//!
//! Snippet persistence and access control: the Tantivy-backed document
//! collection, the `SnippetStore` trait with its backends, and the
//! update-key guard.

pub mod collection;
pub mod error;
pub mod guard;
pub mod index_store;
pub mod memory;
pub mod store;

pub use collection::Collection;
pub use error::StoreError;
pub use guard::{AccessGuard, KeyGuard};
pub use index_store::IndexSnippetStore;
pub use memory::MemorySnippetStore;
pub use store::SnippetStore;
