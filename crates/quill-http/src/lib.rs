//! quill-http — axum router for the text API.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET  /api/texts/` | paginated listing, newest first |
//! | `POST /api/texts/` | create one text |
//! | `GET  /texts/`     | HTML page driving the API from the browser |

pub mod error;
pub mod request_url;
pub mod texts;
pub mod ui;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use quill_core::{Paginator, TextStore};
use url::Url;

pub use error::ApiError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TextStore>,
    pub paginator: Paginator,
    /// Base for absolute page links; falls back to the `Host` header.
    pub public_url: Option<Url>,
}

impl AppState {
    pub fn new(store: Arc<dyn TextStore>, paginator: Paginator) -> Self {
        Self {
            store,
            paginator,
            public_url: None,
        }
    }

    pub fn with_public_url(mut self, url: Option<Url>) -> Self {
        self.public_url = url;
        self
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/texts/", get(texts::list_texts).post(texts::create_text))
        .route("/texts/", get(ui::text_list_page))
        .with_state(state)
}
