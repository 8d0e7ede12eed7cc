//! In-process implementation of the `RecordStore` trait.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use tokenpost_core::error::DomainError;
use tokenpost_core::record::{NewRecord, Record, RecordId};
use tokenpost_core::repository::RecordStore;

#[derive(Debug, Default)]
struct Tables {
    last_id: RecordId,
    records: BTreeMap<RecordId, Record>,
    meta: HashMap<(RecordId, String), String>,
}

/// A record store held entirely in memory.
///
/// The duplicate-title check and the insert happen under the same lock, so
/// the store enforces title uniqueness just like the `PostgreSQL` schema.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    tables: Mutex<Tables>,
}

impl InMemoryRecordStore {
    /// Creates an empty store. The first record gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, DomainError> {
        self.tables
            .lock()
            .map_err(|_| DomainError::Infrastructure("record store lock poisoned".into()))
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn insert(&self, record: NewRecord) -> Result<Record, DomainError> {
        let mut tables = self.lock()?;
        if tables.records.values().any(|r| r.title == record.title) {
            return Err(DomainError::DuplicateTitle);
        }
        tables.last_id += 1;
        let record = record.with_id(tables.last_id);
        tables.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Record>, DomainError> {
        Ok(self.lock()?.records.get(&id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Record>, DomainError> {
        Ok(self
            .lock()?
            .records
            .values()
            .find(|r| r.title == title)
            .cloned())
    }

    async fn get_meta(&self, id: RecordId, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.lock()?.meta.get(&(id, key.to_owned())).cloned())
    }

    async fn put_meta(&self, id: RecordId, key: &str, value: &str) -> Result<(), DomainError> {
        let mut tables = self.lock()?;
        if !tables.records.contains_key(&id) {
            return Err(DomainError::Infrastructure(format!(
                "cannot attach metadata to missing post {id}"
            )));
        }
        tables.meta.insert((id, key.to_owned()), value.to_owned());
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> Result<Option<Record>, DomainError> {
        let mut tables = self.lock()?;
        let removed = tables.records.remove(&id);
        if removed.is_some() {
            tables.meta.retain(|(post_id, _), _| *post_id != id);
        }
        Ok(removed)
    }
}
