use mdsnips_core::models::search::{SearchParams, SortBy, DEFAULT_LIMIT};
use mdsnips_core::models::snippet::{NewSnippet, SnippetRecord, UpdateSnippet};
use mdsnips_core::schema::{decode_create_date, encode_create_date};

#[test]
fn generated_record_has_all_required_fields() {
    let record = SnippetRecord::generate("Hello", "# Hi");
    assert!(!record.id.is_empty());
    assert!(!record.update_key.is_empty());
    assert_eq!(record.title, "Hello");
    assert_eq!(record.body, "# Hi");
}

#[test]
fn snippet_json_never_carries_update_key() {
    let record = SnippetRecord::generate("Hello", "# Hi");
    let json = serde_json::to_value(record.to_snippet()).unwrap();
    assert_eq!(json["title"], "Hello");
    assert_eq!(json["body"], "# Hi");
    assert!(json.get("createDate").is_some());
    assert!(json.get("updateKey").is_none());
}

#[test]
fn created_snippet_json_carries_update_key_once() {
    let record = SnippetRecord::generate("Hello", "# Hi");
    let key = record.update_key.clone();
    let json = serde_json::to_value(record.into_created()).unwrap();
    assert_eq!(json["updateKey"], key.as_str());
    assert_eq!(json["title"], "Hello");
    assert!(json.get("snippet").is_none());
}

#[test]
fn list_item_is_a_projection() {
    let record = SnippetRecord::generate("Hello", "# Hi");
    let json = serde_json::to_value(record.to_list_item()).unwrap();
    let obj = json.as_object().unwrap();
    let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["createDate", "id", "title"]);
}

#[test]
fn record_debug_redacts_update_key() {
    let record = SnippetRecord::generate("Hello", "# Hi");
    let debug = format!("{record:?}");
    assert!(debug.contains("<redacted>"));
    assert!(!debug.contains(&record.update_key));
}

#[test]
fn sort_by_parses_only_known_values() {
    assert_eq!("createDate_ASC".parse::<SortBy>().unwrap(), SortBy::CreateDateAsc);
    assert_eq!("createDate_DESC".parse::<SortBy>().unwrap(), SortBy::CreateDateDesc);
    assert!("createDate_asc".parse::<SortBy>().is_err());
    assert!("title_ASC".parse::<SortBy>().is_err());
    assert_eq!(SortBy::default(), SortBy::CreateDateDesc);
}

#[test]
fn sort_by_serializes_with_wire_names() {
    assert_eq!(
        serde_json::to_string(&SortBy::CreateDateAsc).unwrap(),
        "\"createDate_ASC\""
    );
}

#[test]
fn search_params_ignore_blank_text() {
    let params = SearchParams {
        text: Some("   ".to_string()),
        ..SearchParams::default()
    };
    assert_eq!(params.text_query(), None);
    assert_eq!(params.limit, DEFAULT_LIMIT);
    assert_eq!(params.skip, 0);
}

#[test]
fn request_bodies_default_missing_fields() {
    let create: NewSnippet = serde_json::from_str(r#"{"title":"t"}"#).unwrap();
    assert_eq!(create.body, "");

    let update: UpdateSnippet =
        serde_json::from_str(r#"{"id":"abc","updateKey":"k","title":"t","body":"b"}"#).unwrap();
    assert_eq!(update.update_key, "k");
}

#[test]
fn create_date_column_round_trips_at_microsecond_precision() {
    let ts = jiff::Timestamp::from_microsecond(1_700_000_000_123_456).unwrap();
    assert_eq!(decode_create_date(encode_create_date(ts)).unwrap(), ts);
}

#[test]
fn generated_create_date_survives_the_column_unchanged() {
    for _ in 0..100 {
        let record = SnippetRecord::generate("Hello", "# Hi");
        let stored = decode_create_date(encode_create_date(record.create_date)).unwrap();
        assert_eq!(stored, record.create_date);
        assert_eq!(record.create_date.subsec_nanosecond() % 1_000, 0);
    }
}
