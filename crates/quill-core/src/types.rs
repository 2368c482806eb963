//! Core record types.
//!
//! [`TextRecord`] is what stores hand back and what the API serializes.
//! [`NewText`] is validated input; it can only be built from non-blank text.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// Number of characters kept by [`TextRecord::excerpt`].
pub const EXCERPT_LENGTH_CHARS: usize = 100;

/// A stored text blob.
///
/// Records are totally ordered newest first by `(created_at desc, id desc)`;
/// see [`TextRecord::ordering_key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRecord {
    /// Datastore-assigned identifier, unique and monotonically increasing.
    pub id: i64,
    /// The submitted text, never empty.
    pub content: String,
    /// Server-assigned creation time (UTC).
    #[serde(rename = "createdAt", serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl TextRecord {
    /// Key whose *descending* order is the listing order.
    pub fn ordering_key(&self) -> (DateTime<Utc>, i64) {
        (self.created_at, self.id)
    }

    /// The content cut down to [`EXCERPT_LENGTH_CHARS`] characters, with a
    /// trailing `" ..."` when anything was dropped.
    pub fn excerpt(&self) -> String {
        match self.content.char_indices().nth(EXCERPT_LENGTH_CHARS) {
            Some((cut, _)) => format!("{} ...", &self.content[..cut]),
            None => self.content.clone(),
        }
    }
}

impl std::fmt::Display for TextRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.id, self.excerpt())
    }
}

/// RFC 3339 with microseconds and a `Z` suffix, e.g. `2024-01-15T10:00:00.123456Z`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(ts))
}

/// Text that passed create-time validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewText(String);

impl NewText {
    /// Trim surrounding whitespace; `None` when nothing is left.
    pub fn new(content: impl AsRef<str>) -> Option<Self> {
        let trimmed = content.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for NewText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
