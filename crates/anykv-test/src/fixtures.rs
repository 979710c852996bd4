//! Test fixtures for common payloads.

use serde_json::{Value, json};

/// A successful response envelope wrapping `result`.
#[must_use]
pub fn ok_envelope(result: Value) -> Value {
    json!({ "status": "OK", "result": result })
}

/// A failed response envelope with a message and optional cause.
#[must_use]
pub fn err_envelope(message: &str, detail: Option<&str>) -> Value {
    match detail {
        Some(detail) => json!({ "status": "ERR", "result": message, "detail": detail }),
        None => json!({ "status": "ERR", "result": message }),
    }
}

/// A user record without an id, as passed to `create`.
#[must_use]
pub fn test_user_init() -> Value {
    json!({
        "name": "Leo X.",
        "emails": ["x@le0.me"],
    })
}

/// The same user as a stored record with `id`.
#[must_use]
pub fn test_user(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Leo X.",
        "emails": ["x@le0.me"],
    })
}
