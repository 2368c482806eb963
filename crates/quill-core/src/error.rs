//! Error types shared by the store and HTTP layers.

use thiserror::Error;

/// The requested page is out of range or could not be parsed.
///
/// The message is part of the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid page.")]
pub struct InvalidPage;

/// A datastore failure. Fatal to the request, never to the process.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("storage lock poisoned")]
    Poisoned,

    #[error("corrupt row {id}: {reason}")]
    Corrupt { id: i64, reason: String },
}

/// Failure of a paginated listing.
#[derive(Debug, Error)]
pub enum ListError {
    #[error(transparent)]
    InvalidPage(#[from] InvalidPage),

    #[error(transparent)]
    Store(#[from] StoreError),
}
