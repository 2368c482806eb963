//! Test builders — an in-process app driven through `tower::ServiceExt`.
//!
//! These helpers panic on failure rather than returning `Result`.

use std::num::NonZeroU64;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, HOST};
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use quill::quill_store::{MemoryTextStore, SqliteTextStore};
use quill::{AppState, NewText, Paginator, StoreError, TextRecord, TextStore};
use serde_json::Value;
use tower::ServiceExt;

/// Host header sent with every request; page links are built from it.
pub const TEST_HOST: &str = "testserver";

/// Page size used when a test does not pick one.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

pub const TEXTS_URL: &str = "/api/texts/";

// ---------------------------------------------------------------------------
// TestApp
// ---------------------------------------------------------------------------

/// Which store a [`TestApp`] runs on.
#[derive(Debug, Clone, Copy)]
pub enum Backend {
    Memory,
    Sqlite,
}

/// A router plus direct access to its store.
pub struct TestApp {
    pub store: Arc<dyn TextStore>,
    pub page_size: u64,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with(Backend::Memory, DEFAULT_PAGE_SIZE)
    }

    pub fn with(backend: Backend, page_size: u64) -> Self {
        let store: Arc<dyn TextStore> = match backend {
            Backend::Memory => Arc::new(MemoryTextStore::new()),
            Backend::Sqlite => Arc::new(SqliteTextStore::open_in_memory().unwrap()),
        };
        Self::with_store(store, page_size)
    }

    pub fn with_store(store: Arc<dyn TextStore>, page_size: u64) -> Self {
        let paginator = Paginator::new(NonZeroU64::new(page_size).unwrap());
        let router = quill::router(AppState::new(store.clone(), paginator));
        Self {
            store,
            page_size,
            router,
        }
    }

    /// Bulk-insert `n` texts named `"0"`, `"1"`, … sharing one timestamp.
    pub fn seed(&self, n: u64) -> Vec<TextRecord> {
        let contents = (0..n).map(|i| NewText::new(i.to_string()).unwrap()).collect();
        self.store.bulk_create(contents).unwrap()
    }

    /// The whole collection in listing order.
    pub fn ordered(&self) -> Vec<TextRecord> {
        let count = self.store.count().unwrap();
        self.store.range(0, count).unwrap()
    }

    /// Expected JSON for page `number`, sliced straight from the store.
    pub fn expected_page(&self, number: u64) -> Vec<Value> {
        let all = self.ordered();
        let from = (((number - 1) * self.page_size) as usize).min(all.len());
        let to = ((number * self.page_size) as usize).min(all.len());
        all[from..to]
            .iter()
            .map(|r| serde_json::to_value(r).unwrap())
            .collect()
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .header(HOST, TEST_HOST)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// `GET /api/texts/` with an optional raw `page` value.
    pub async fn get_page(&self, page: Option<&str>) -> (StatusCode, Value) {
        match page {
            Some(page) => self.get(&format!("{TEXTS_URL}?page={page}")).await,
            None => self.get(TEXTS_URL).await,
        }
    }

    pub async fn post_json(&self, body: &Value) -> (StatusCode, Value) {
        self.post_raw(&body.to_string()).await
    }

    pub async fn post_raw(&self, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(TEXTS_URL)
            .header(HOST, TEST_HOST)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Status, content type and body text for non-JSON routes.
    pub async fn get_text(&self, uri: &str) -> (StatusCode, String, String) {
        let request = Request::builder()
            .uri(uri)
            .header(HOST, TEST_HOST)
            .body(Body::empty())
            .unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }
}

// ---------------------------------------------------------------------------
// UnavailableStore
// ---------------------------------------------------------------------------

/// A store whose backend is down: every call fails.
pub struct UnavailableStore;

impl UnavailableStore {
    fn error() -> StoreError {
        StoreError::Backend("connection refused".to_string())
    }
}

impl TextStore for UnavailableStore {
    fn create(&self, _: NewText) -> Result<TextRecord, StoreError> {
        Err(Self::error())
    }

    fn bulk_create(&self, _: Vec<NewText>) -> Result<Vec<TextRecord>, StoreError> {
        Err(Self::error())
    }

    fn count(&self) -> Result<u64, StoreError> {
        Err(Self::error())
    }

    fn range(&self, _: u64, _: u64) -> Result<Vec<TextRecord>, StoreError> {
        Err(Self::error())
    }
}
