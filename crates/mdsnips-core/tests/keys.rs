use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use mdsnips_core::keys::{checksum_hex, snippet_id, update_key};

#[test]
fn checksum_matches_crc32_check_value() {
    // CRC-32/IEEE of "123456789" is 0xcbf43926.
    assert_eq!(checksum_hex(&["1234", "5678"], 9), "cbf43926");
}

#[test]
fn checksum_is_unpadded_lowercase_hex() {
    let out = checksum_hex(&["title", "body"], 42);
    assert!(!out.is_empty() && out.len() <= 8);
    assert!(out.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn salt_changes_the_checksum() {
    assert_ne!(
        checksum_hex(&["same", "content"], 1),
        checksum_hex(&["same", "content"], 2)
    );
}

#[test]
fn ids_are_distinct_in_practice() {
    let ids: HashSet<String> = (0..1000)
        .map(|i| snippet_id(&format!("title {i}"), &format!("# body {i}\ntext")))
        .collect();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn same_content_gets_a_fresh_id_each_time() {
    let ids: HashSet<String> = (0..20)
        .map(|_| {
            thread::sleep(Duration::from_millis(1));
            snippet_id("Hello", "# Hi")
        })
        .collect();
    assert_eq!(ids.len(), 20);
}

#[test]
fn same_body_gets_a_fresh_update_key_each_time() {
    let first = update_key("# Hi");
    thread::sleep(Duration::from_millis(1));
    let second = update_key("# Hi");
    assert_ne!(first, second);
}

#[test]
fn update_keys_are_non_empty_hex() {
    let key = update_key("# Hi");
    assert!(!key.is_empty());
    assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
}
