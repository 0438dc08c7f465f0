//! mdsnips-core
//!
//! Pure domain types, key derivation, and the Tantivy schema.
//! No I/O. This is the shared vocabulary of the mdsnips system.

pub mod error;
pub mod keys;
pub mod models;
pub mod schema;
