//! Snippet identifier and update-key derivation.
//!
//! Both tokens are CRC-32 (IEEE) checksums of snippet content salted with the
//! nanosecond-of-second of the wall clock, rendered as unpadded lowercase hex.
//! They are short and URL friendly. Uniqueness comes from the salt, not the
//! checksum, so a collision is unlikely but possible; callers that persist ids
//! must be prepared to detect one.

/// Derive a fresh snippet id from `title + body + salt`.
pub fn snippet_id(title: &str, body: &str) -> String {
    checksum_hex(&[title, body], clock_salt())
}

/// Derive a fresh update key from `body + salt`.
///
/// Reads the clock separately from [`snippet_id`], so the two tokens never
/// share a salt draw.
pub fn update_key(body: &str) -> String {
    checksum_hex(&[body], clock_salt())
}

/// CRC-32 of the concatenated `parts` followed by the decimal `salt`.
pub fn checksum_hex(parts: &[&str], salt: i32) -> String {
    let mut hasher = crc32fast::Hasher::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hasher.update(salt.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

fn clock_salt() -> i32 {
    jiff::Timestamp::now().subsec_nanosecond()
}
