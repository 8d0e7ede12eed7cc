//! Record store abstraction.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::record::{NewRecord, Record, RecordId};

/// Persistence contract for records and their key/value metadata.
///
/// Implementations must reject a second record with an identical title by
/// returning `DomainError::DuplicateTitle` from `insert`, so that concurrent
/// creations cannot both succeed.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a new record and return it with its assigned identifier.
    async fn insert(&self, record: NewRecord) -> Result<Record, DomainError>;

    /// Load a record by identifier.
    async fn find_by_id(&self, id: RecordId) -> Result<Option<Record>, DomainError>;

    /// Load a record by exact, case-sensitive title.
    async fn find_by_title(&self, title: &str) -> Result<Option<Record>, DomainError>;

    /// Read a metadata value.
    async fn get_meta(&self, id: RecordId, key: &str) -> Result<Option<String>, DomainError>;

    /// Write (insert or replace) a metadata value.
    async fn put_meta(&self, id: RecordId, key: &str, value: &str) -> Result<(), DomainError>;

    /// Permanently remove a record together with its metadata.
    /// Returns the removed record, or `None` if nothing was removed.
    async fn delete(&self, id: RecordId) -> Result<Option<Record>, DomainError>;
}
