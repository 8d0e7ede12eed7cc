//! Test stores — `RecordStore` implementations that fail on purpose.

use async_trait::async_trait;
use tokenpost_core::error::DomainError;
use tokenpost_core::record::{NewRecord, Record, RecordId};
use tokenpost_core::repository::RecordStore;
use tokenpost_store::InMemoryRecordStore;

fn connection_refused() -> DomainError {
    DomainError::Infrastructure("connection refused".into())
}

/// A record store whose every operation returns an infrastructure error.
/// Useful for testing error-handling paths.
#[derive(Debug)]
pub struct FailingRecordStore;

#[async_trait]
impl RecordStore for FailingRecordStore {
    async fn insert(&self, _record: NewRecord) -> Result<Record, DomainError> {
        Err(connection_refused())
    }

    async fn find_by_id(&self, _id: RecordId) -> Result<Option<Record>, DomainError> {
        Err(connection_refused())
    }

    async fn find_by_title(&self, _title: &str) -> Result<Option<Record>, DomainError> {
        Err(connection_refused())
    }

    async fn get_meta(&self, _id: RecordId, _key: &str) -> Result<Option<String>, DomainError> {
        Err(connection_refused())
    }

    async fn put_meta(&self, _id: RecordId, _key: &str, _value: &str) -> Result<(), DomainError> {
        Err(connection_refused())
    }

    async fn delete(&self, _id: RecordId) -> Result<Option<Record>, DomainError> {
        Err(connection_refused())
    }
}

/// An in-memory store that can be told to fail inserts or metadata writes,
/// or to report a title conflict on insert, while every other operation
/// behaves normally.
#[derive(Debug, Default)]
pub struct FaultInjectingRecordStore {
    inner: InMemoryRecordStore,
    fail_insert: bool,
    fail_put_meta: bool,
    conflict_on_insert: bool,
}

impl FaultInjectingRecordStore {
    /// A store that refuses every insert.
    #[must_use]
    pub fn rejecting_inserts() -> Self {
        Self {
            fail_insert: true,
            ..Self::default()
        }
    }

    /// A store whose title lookups find nothing but whose inserts hit the
    /// unique-title constraint, as when a concurrent request wins the race.
    #[must_use]
    pub fn losing_title_race() -> Self {
        Self {
            conflict_on_insert: true,
            ..Self::default()
        }
    }

    /// A store that accepts inserts but refuses every metadata write.
    #[must_use]
    pub fn rejecting_metadata() -> Self {
        Self {
            fail_put_meta: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl RecordStore for FaultInjectingRecordStore {
    async fn insert(&self, record: NewRecord) -> Result<Record, DomainError> {
        if self.fail_insert {
            return Err(connection_refused());
        }
        if self.conflict_on_insert {
            return Err(DomainError::DuplicateTitle);
        }
        self.inner.insert(record).await
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Record>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Record>, DomainError> {
        self.inner.find_by_title(title).await
    }

    async fn get_meta(&self, id: RecordId, key: &str) -> Result<Option<String>, DomainError> {
        self.inner.get_meta(id, key).await
    }

    async fn put_meta(&self, id: RecordId, key: &str, value: &str) -> Result<(), DomainError> {
        if self.fail_put_meta {
            return Err(connection_refused());
        }
        self.inner.put_meta(id, key, value).await
    }

    async fn delete(&self, id: RecordId) -> Result<Option<Record>, DomainError> {
        self.inner.delete(id).await
    }
}
