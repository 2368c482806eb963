//! quill — append-only text storage with a numerically paginated JSON API.
//!
//! This crate re-exports the workspace layers so integration tests and the
//! binary share one import path.
//!
//! # Architecture
//!
//! ```text
//! HTTP (quill-http) ──► validation / pagination (quill-core) ──► TextStore (quill-store)
//! ```

pub use quill_core;
pub use quill_http;
pub use quill_store;

pub use quill_core::{
    config::Config, InvalidPage, NewText, Page, PageWindow, Paginator, StoreError, TextRecord,
    TextStore,
};
pub use quill_http::{router, AppState};

/// Open the configured store and build the router.
pub fn app(config: &Config) -> anyhow::Result<axum::Router> {
    let store = quill_store::open(&config.storage)?;
    let state = AppState::new(store, config.paginator()?).with_public_url(config.public_url()?);
    Ok(router(state))
}
