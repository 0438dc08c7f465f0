use tantivy::schema::{Schema, FAST, INDEXED, STORED, STRING, TEXT};

use crate::error::CoreError;

/// Field names used in the snippet collection. These double as the
/// persisted record's field names.
pub mod field {
    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const BODY: &str = "body";
    pub const UPDATE_KEY: &str = "updateKey";
    pub const CREATE_DATE: &str = "createDate";
}

/// Fields covered by the compound full-text index.
pub const TEXT_INDEX_FIELDS: [&str; 2] = [field::TITLE, field::BODY];

/// Build the Tantivy schema for the snippet collection.
pub fn build_schema() -> Schema {
    let mut builder = Schema::builder();

    // Exact-match lookup key
    builder.add_text_field(field::ID, STRING | STORED);

    // Compound text index over title + body
    builder.add_text_field(field::TITLE, TEXT | STORED);
    builder.add_text_field(field::BODY, TEXT | STORED);

    // Stored only, never searchable
    builder.add_text_field(field::UPDATE_KEY, STORED);

    // Unix microseconds, fast for sorting and pagination
    builder.add_i64_field(field::CREATE_DATE, INDEXED | STORED | FAST);

    builder.build()
}

/// Encode a creation timestamp for the `createDate` column.
pub fn encode_create_date(ts: jiff::Timestamp) -> i64 {
    ts.as_microsecond()
}

/// Decode a `createDate` column value.
pub fn decode_create_date(micros: i64) -> Result<jiff::Timestamp, CoreError> {
    Ok(jiff::Timestamp::from_microsecond(micros)?)
}
