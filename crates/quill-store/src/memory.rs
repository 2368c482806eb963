//! In-memory text store.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use quill_core::{NewText, StoreError, TextRecord, TextStore};
use tracing::instrument;

#[derive(Debug, Default)]
struct Inner {
    /// Ascending by `(created_at, id)`; listings walk it backwards.
    records: Vec<TextRecord>,
    last_id: i64,
}

impl Inner {
    fn insert(&mut self, content: NewText, created_at: DateTime<Utc>) -> TextRecord {
        self.last_id += 1;
        let record = TextRecord {
            id: self.last_id,
            content: content.into_inner(),
            created_at,
        };
        // The clock can step backwards; keep the vector sorted regardless.
        let key = record.ordering_key();
        let at = self.records.partition_point(|r| r.ordering_key() < key);
        self.records.insert(at, record.clone());
        record
    }
}

/// A [`TextStore`] held entirely in process memory.
///
/// Ids are assigned under the write lock, so they are unique and increase
/// in creation order.
#[derive(Debug, Default)]
pub struct MemoryTextStore {
    inner: RwLock<Inner>,
}

impl MemoryTextStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextStore for MemoryTextStore {
    #[instrument(skip_all)]
    fn create(&self, content: NewText) -> Result<TextRecord, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.insert(content, Utc::now()))
    }

    #[instrument(skip_all, fields(n = contents.len()))]
    fn bulk_create(&self, contents: Vec<NewText>) -> Result<Vec<TextRecord>, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let now = Utc::now();
        Ok(contents
            .into_iter()
            .map(|content| inner.insert(content, now))
            .collect())
    }

    fn count(&self) -> Result<u64, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.records.len() as u64)
    }

    fn range(&self, offset: u64, limit: u64) -> Result<Vec<TextRecord>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(inner
            .records
            .iter()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> NewText {
        NewText::new(s).unwrap()
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let store = MemoryTextStore::new();
        let a = store.create(text("a")).unwrap();
        let b = store.create(text("b")).unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn range_is_newest_first() {
        let store = MemoryTextStore::new();
        for s in ["a", "b", "c"] {
            store.create(text(s)).unwrap();
        }
        let ids: Vec<i64> = store.range(0, 10).unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        let ids: Vec<i64> = store.range(1, 1).unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2]);
        assert!(store.range(3, 10).unwrap().is_empty());
    }

    #[test]
    fn bulk_create_shares_timestamp_and_breaks_ties_by_id() {
        let store = MemoryTextStore::new();
        let created = store
            .bulk_create(vec![text("x"), text("y"), text("z")])
            .unwrap();
        assert!(created.iter().all(|r| r.created_at == created[0].created_at));

        let listed: Vec<String> = store
            .range(0, 10)
            .unwrap()
            .into_iter()
            .map(|r| r.content)
            .collect();
        assert_eq!(listed, vec!["z", "y", "x"]);
    }

    #[test]
    fn earlier_timestamp_sorts_after_later_even_with_higher_id() {
        let store = MemoryTextStore::new();
        let later = Utc::now();
        let earlier = later - chrono::Duration::seconds(5);
        {
            let mut inner = store.inner.write().unwrap();
            inner.insert(text("later"), later);
            inner.insert(text("earlier"), earlier);
        }
        let listed: Vec<String> = store
            .range(0, 10)
            .unwrap()
            .into_iter()
            .map(|r| r.content)
            .collect();
        assert_eq!(listed, vec!["later", "earlier"]);
    }
}
