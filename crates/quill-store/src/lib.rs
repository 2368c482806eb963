//! quill-store — [`TextStore`](quill_core::TextStore) implementations.
//!
//! - [`SqliteTextStore`]: the durable store. Ids come from SQLite's
//!   `AUTOINCREMENT`; ordering is served by a composite index.
//! - [`MemoryTextStore`]: process-local, used by tests and `backend = "memory"`.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryTextStore;
pub use sqlite::SqliteTextStore;

use std::sync::Arc;

use quill_core::config::{StorageBackend, StorageConfig};
use quill_core::{StoreError, TextStore};

/// Open the store selected by `[storage]`.
pub fn open(config: &StorageConfig) -> Result<Arc<dyn TextStore>, StoreError> {
    let store: Arc<dyn TextStore> = match config.backend {
        StorageBackend::Sqlite => Arc::new(SqliteTextStore::open(&config.path)?),
        StorageBackend::Memory => Arc::new(MemoryTextStore::new()),
    };
    Ok(store)
}
