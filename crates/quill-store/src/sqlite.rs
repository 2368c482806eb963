//! SQLite-backed text store.
//!
//! Schema:
//!
//! ```sql
//! texts(id INTEGER PRIMARY KEY AUTOINCREMENT,
//!       content TEXT NOT NULL,
//!       created_at_us INTEGER NOT NULL)
//! ```
//!
//! `created_at_us` is microseconds since the Unix epoch. Listing order is
//! `created_at_us DESC, id DESC`, backed by `texts_ordering`.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use quill_core::{NewText, StoreError, TextRecord, TextStore};
use rusqlite::{params, Connection, Row};
use tracing::{debug, instrument};

const SCHEMA: &str = r#"
PRAGMA journal_mode=WAL;
PRAGMA synchronous=NORMAL;

CREATE TABLE IF NOT EXISTS texts (
  id            INTEGER PRIMARY KEY AUTOINCREMENT,
  content       TEXT NOT NULL CHECK (length(content) > 0),
  created_at_us INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS texts_ordering ON texts (created_at_us DESC, id DESC);
"#;

fn map_sql(err: rusqlite::Error) -> StoreError {
    StoreError::Backend(format!("sqlite: {err}"))
}

/// A [`TextStore`] over a single SQLite connection.
///
/// The connection sits behind a mutex; together with `AUTOINCREMENT` this
/// makes id assignment atomic and monotonic.
#[derive(Debug)]
pub struct SqliteTextStore {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteTextStore {
    /// Open (creating if needed) the database at `path` and apply the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Backend(format!("creating {}: {e}", parent.display())))?;
        }
        let conn = Connection::open(&path).map_err(map_sql)?;
        debug!(path = %path.display(), "opened sqlite store");
        Self::with_connection(conn, Some(path))
    }

    /// A private, non-persistent database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(map_sql)?;
        Self::with_connection(conn, None)
    }

    fn with_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA).map_err(map_sql)?;
        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// Database file, or `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn insert(conn: &Connection, content: NewText, created_at_us: i64) -> Result<TextRecord, StoreError> {
    conn.execute(
        "INSERT INTO texts (content, created_at_us) VALUES (?1, ?2)",
        params![content.as_str(), created_at_us],
    )
    .map_err(map_sql)?;
    let id = conn.last_insert_rowid();
    Ok(TextRecord {
        id,
        content: content.into_inner(),
        created_at: from_micros(id, created_at_us)?,
    })
}

fn from_micros(id: i64, us: i64) -> Result<DateTime<Utc>, StoreError> {
    DateTime::from_timestamp_micros(us).ok_or_else(|| StoreError::Corrupt {
        id,
        reason: format!("timestamp {us}us out of range"),
    })
}

/// Raw row; the timestamp is converted after the query so that a bad value
/// surfaces as [`StoreError::Corrupt`] instead of a driver error.
fn read_row(row: &Row<'_>) -> rusqlite::Result<(i64, String, i64)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

impl TextStore for SqliteTextStore {
    #[instrument(skip_all)]
    fn create(&self, content: NewText) -> Result<TextRecord, StoreError> {
        let conn = self.conn()?;
        insert(&conn, content, Utc::now().timestamp_micros())
    }

    #[instrument(skip_all, fields(n = contents.len()))]
    fn bulk_create(&self, contents: Vec<NewText>) -> Result<Vec<TextRecord>, StoreError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(map_sql)?;
        let now = Utc::now().timestamp_micros();
        let records = contents
            .into_iter()
            .map(|content| insert(&tx, content, now))
            .collect::<Result<Vec<_>, _>>()?;
        tx.commit().map_err(map_sql)?;
        Ok(records)
    }

    fn count(&self) -> Result<u64, StoreError> {
        let conn = self.conn()?;
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM texts", [], |row| row.get(0))
            .map_err(map_sql)?;
        Ok(n.max(0) as u64)
    }

    fn range(&self, offset: u64, limit: u64) -> Result<Vec<TextRecord>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare_cached(
                "SELECT id, content, created_at_us FROM texts \
                 ORDER BY created_at_us DESC, id DESC \
                 LIMIT ?1 OFFSET ?2",
            )
            .map_err(map_sql)?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map(params![limit, offset], read_row)
            .map_err(map_sql)?;

        let mut records = Vec::new();
        for row in rows {
            let (id, content, us) = row.map_err(map_sql)?;
            records.push(TextRecord {
                id,
                content,
                created_at: from_micros(id, us)?,
            });
        }
        Ok(records)
    }
}
