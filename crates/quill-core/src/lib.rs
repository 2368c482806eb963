//! quill-core — domain layer for the quill text store.
//!
//! This crate owns everything that does not depend on a particular datastore
//! or transport: the record types, create-time validation, the [`TextStore`]
//! seam, the paginator, and configuration.
//!
//! # Architecture
//!
//! ```text
//! HTTP (quill-http) ──► validation ──► TextStore (quill-store)
//!        │                                  ▲
//!        └──────────► pagination ───────────┘
//! ```
//!
//! Stores are synchronous; the HTTP layer moves calls onto tokio's blocking
//! pool.

pub mod config;
pub mod error;
pub mod pagination;
pub mod store;
pub mod types;
pub mod validation;

pub use error::{InvalidPage, ListError, StoreError};
pub use pagination::{Page, PageNeighbours, PageWindow, Paginator};
pub use store::{paginate, TextStore};
pub use types::{NewText, TextRecord};
pub use validation::{validate_new_text, ValidationErrors};
