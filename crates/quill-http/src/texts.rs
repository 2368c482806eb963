//! `/api/texts/` handlers.

use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::Json;
use quill_core::pagination::{PaginatedBody, PAGE_QUERY_PARAM};
use quill_core::{paginate, validate_new_text, ListError, TextRecord};
use serde_json::Value;
use tracing::{info, warn};

use crate::request_url::absolute_url;
use crate::{ApiError, AppState};

/// `GET /api/texts/?page=<n>`
pub async fn list_texts(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    RawQuery(query): RawQuery,
) -> Result<Json<PaginatedBody<TextRecord>>, ApiError> {
    let raw_page = query.as_deref().and_then(page_param);
    let request_url = absolute_url(state.public_url.as_ref(), &headers, &uri)?;

    let store = state.store.clone();
    let paginator = state.paginator;
    let requested = raw_page.clone();
    let result =
        tokio::task::spawn_blocking(move || paginate(store.as_ref(), &paginator, requested.as_deref()))
            .await?;

    let page = result.inspect_err(|err| {
        if let ListError::InvalidPage(_) = err {
            warn!(page = ?raw_page, "invalid page requested");
        }
    })?;
    Ok(Json(page.into_body(&request_url)))
}

/// `POST /api/texts/` with `{"content": "..."}`
///
/// An empty body reads as `{}`; anything else must be valid JSON.
pub async fn create_text(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<TextRecord>), ApiError> {
    let body: Value = if body.is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::Parse(e.to_string()))?
    };
    let content = validate_new_text(&body)?;

    let store = state.store.clone();
    let record = tokio::task::spawn_blocking(move || store.create(content)).await??;

    info!(id = record.id, excerpt = %record.excerpt(), "text created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Last `page` value in a raw query string, percent-decoded.
fn page_param(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == PAGE_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .last()
}
