//! The [`TextStore`] seam between the domain and a datastore.
//!
//! Implementations live in `quill-store`. All methods are blocking; async
//! callers are expected to run them on a blocking thread.

use tracing::debug;

use crate::error::{ListError, StoreError};
use crate::pagination::{Page, Paginator};
use crate::types::{NewText, TextRecord};

/// Append-only collection of [`TextRecord`]s ordered by
/// `(created_at desc, id desc)`.
pub trait TextStore: Send + Sync {
    /// Persist one record, assigning its id and creation time.
    fn create(&self, content: NewText) -> Result<TextRecord, StoreError>;

    /// Persist several records atomically under a single creation time.
    /// Ids follow input order.
    fn bulk_create(&self, contents: Vec<NewText>) -> Result<Vec<TextRecord>, StoreError>;

    /// Total number of records.
    fn count(&self) -> Result<u64, StoreError>;

    /// Up to `limit` records of the ordered sequence, starting at `offset`.
    fn range(&self, offset: u64, limit: u64) -> Result<Vec<TextRecord>, StoreError>;
}

/// Read page `raw_page` of the ordered sequence.
///
/// A malformed page number is rejected before the store is touched.
///
/// The count and the range are read separately; a create landing in between
/// can shift the slice by one record, which is acceptable for this listing.
pub fn paginate<S>(
    store: &S,
    paginator: &Paginator,
    raw_page: Option<&str>,
) -> Result<Page<TextRecord>, ListError>
where
    S: TextStore + ?Sized,
{
    let number = Paginator::parse_page_number(raw_page)?;
    let count = store.count()?;
    let window = paginator.window(number, count)?;
    debug!(
        page = window.number,
        offset = window.offset,
        limit = window.limit,
        count,
        "page window"
    );

    let items = if window.limit == 0 {
        Vec::new()
    } else {
        store.range(window.offset, window.limit)?
    };
    Ok(Page { window, items })
}
