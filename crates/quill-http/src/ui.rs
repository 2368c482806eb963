//! Browser page for the text API.
//!
//! The page is static; it lists texts and submits new ones through
//! `/api/texts/` with `fetch`.

use axum::response::Html;

const TEXT_LIST_HTML: &str = include_str!("../assets/text_list.html");

/// `GET /texts/`
pub async fn text_list_page() -> Html<&'static str> {
    Html(TEXT_LIST_HTML)
}
