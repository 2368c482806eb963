//! Assertions for listing responses.
//!
//! These wrap `pretty_assertions` so a failing page shows a readable diff of
//! the JSON.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use super::TestApp;

/// Assert a 404 with the fixed invalid page body.
pub fn assert_invalid_page(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::NOT_FOUND, "body: {body}");
    assert_eq!(body, &json!({ "detail": "Invalid page." }));
}

/// Assert `body` is page `number` of `app`'s store, with consistent
/// neighbour numbers and links.
pub fn assert_page(app: &TestApp, body: &Value, number: u64) {
    let count = app.store.count().unwrap();
    assert_eq!(body["count"], json!(count));
    assert_eq!(body["results"], Value::Array(app.expected_page(number)));

    let has_next = number * app.page_size < count;
    let has_previous = number > 1;
    assert_eq!(body["next"].is_null(), !has_next, "next on page {number}");
    assert_eq!(
        body["previous"].is_null(),
        !has_previous,
        "previous on page {number}"
    );
    if has_next {
        assert_eq!(body["next"], json!(number + 1));
    }
    if has_previous {
        assert_eq!(body["previous"], json!(number - 1));
    }

    // Numbers and links come from the same neighbours.
    assert_eq!(body["links"]["next"].is_null(), body["next"].is_null());
    assert_eq!(
        body["links"]["previous"].is_null(),
        body["previous"].is_null()
    );
}
