//! Request body validation, run before anything reaches the store.

use serde::Serialize;

use mdsnips_core::models::snippet::{NewSnippet, UpdateSnippet};

pub const TITLE_MAX_CHARS: usize = 64;
pub const BODY_MAX_CHARS: usize = 64_000;

/// One failed constraint on one request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    /// Which constraint failed: `required` or `max`.
    pub tag: &'static str,
    pub param: String,
}

pub fn new_snippet(req: &NewSnippet) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_length(&mut errors, "title", &req.title, TITLE_MAX_CHARS);
    check_length(&mut errors, "body", &req.body, BODY_MAX_CHARS);
    errors
}

pub fn update_snippet(req: &UpdateSnippet) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_required(&mut errors, "id", &req.id);
    check_required(&mut errors, "updateKey", &req.update_key);
    check_length(&mut errors, "title", &req.title, TITLE_MAX_CHARS);
    check_length(&mut errors, "body", &req.body, BODY_MAX_CHARS);
    errors
}

fn check_required(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.push(FieldError {
            field,
            tag: "required",
            param: String::new(),
        });
    }
}

/// Lengths count Unicode scalar values, not bytes.
fn check_length(errors: &mut Vec<FieldError>, field: &'static str, value: &str, max: usize) {
    if value.is_empty() {
        check_required(errors, field, value);
        return;
    }
    if value.chars().count() > max {
        errors.push(FieldError {
            field,
            tag: "max",
            param: max.to_string(),
        });
    }
}
