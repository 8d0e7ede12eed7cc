//! The record model shared by the posts context and the stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned record identifier. Always positive.
pub type RecordId = u64;

/// Metadata key under which the deletion token is kept.
pub const TOKEN_META_KEY: &str = "token";

/// Visibility status of a record. Records are only ever created private.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// Not publicly listed.
    Private,
}

impl RecordStatus {
    /// Returns the persisted string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
        }
    }

    /// Parses the persisted string form.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "private" => Some(Self::Private),
            _ => None,
        }
    }
}

/// A persisted record. Metadata (including the token) is not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned identifier.
    pub id: RecordId,
    /// Sanitized title.
    pub title: String,
    /// Sanitized content.
    pub content: String,
    /// Visibility status.
    pub status: RecordStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A record that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    /// Sanitized title.
    pub title: String,
    /// Sanitized content.
    pub content: String,
    /// Visibility status.
    pub status: RecordStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewRecord {
    /// Attaches a store-assigned identifier.
    #[must_use]
    pub fn with_id(self, id: RecordId) -> Record {
        Record {
            id,
            title: self.title,
            content: self.content,
            status: self.status,
            created_at: self.created_at,
        }
    }
}
