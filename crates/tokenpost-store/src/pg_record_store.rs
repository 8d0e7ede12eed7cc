//! `PostgreSQL` implementation of the `RecordStore` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::migrate::MigrateError;
use tracing::{debug, warn};

use tokenpost_core::error::DomainError;
use tokenpost_core::record::{NewRecord, Record, RecordId, RecordStatus};
use tokenpost_core::repository::RecordStore;

const RECORD_COLUMNS: &str = "id, title, content, status, created_at";

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Record {
    type Error = DomainError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let id = RecordId::try_from(row.id)
            .map_err(|_| DomainError::Infrastructure(format!("negative post id {}", row.id)))?;
        let status = RecordStatus::parse(&row.status).ok_or_else(|| {
            DomainError::Infrastructure(format!("unknown post status {:?}", row.status))
        })?;
        Ok(Record {
            id,
            title: row.title,
            content: row.content,
            status,
            created_at: row.created_at,
        })
    }
}

fn infrastructure(err: &sqlx::Error) -> DomainError {
    DomainError::Infrastructure(err.to_string())
}

/// Identifiers above `i64::MAX` cannot exist in a `BIGSERIAL` column.
fn to_db_id(id: RecordId) -> Option<i64> {
    i64::try_from(id).ok()
}

/// PostgreSQL-backed record store.
///
/// Title uniqueness is enforced by the `posts_title_unique` constraint, and
/// metadata rows are removed by `ON DELETE CASCADE`.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    /// Creates a new `PgRecordStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the bundled schema migrations.
    ///
    /// # Errors
    ///
    /// Returns `MigrateError` if a migration fails to apply.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&self, record: NewRecord) -> Result<Record, DomainError> {
        let sql = format!(
            "INSERT INTO posts (title, content, status, created_at) \
             VALUES ($1, $2, $3, $4) RETURNING {RECORD_COLUMNS}"
        );
        let result = sqlx::query_as::<_, PostRow>(&sql)
            .bind(&record.title)
            .bind(&record.content)
            .bind(record.status.as_str())
            .bind(record.created_at)
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(row) => {
                debug!(post_id = row.id, "inserted post");
                Record::try_from(row)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                warn!("title uniqueness constraint rejected insert");
                Err(DomainError::DuplicateTitle)
            }
            Err(err) => Err(infrastructure(&err)),
        }
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Record>, DomainError> {
        let Some(db_id) = to_db_id(id) else {
            return Ok(None);
        };
        let sql = format!("SELECT {RECORD_COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, PostRow>(&sql)
            .bind(db_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?
            .map(Record::try_from)
            .transpose()
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Record>, DomainError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM posts WHERE title = $1 LIMIT 1");
        sqlx::query_as::<_, PostRow>(&sql)
            .bind(title)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?
            .map(Record::try_from)
            .transpose()
    }

    async fn get_meta(&self, id: RecordId, key: &str) -> Result<Option<String>, DomainError> {
        let Some(db_id) = to_db_id(id) else {
            return Ok(None);
        };
        sqlx::query_scalar::<_, String>(
            "SELECT meta_value FROM post_meta WHERE post_id = $1 AND meta_key = $2",
        )
        .bind(db_id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| infrastructure(&e))
    }

    async fn put_meta(&self, id: RecordId, key: &str, value: &str) -> Result<(), DomainError> {
        let db_id = to_db_id(id)
            .ok_or_else(|| DomainError::Infrastructure(format!("post id {id} out of range")))?;
        sqlx::query(
            "INSERT INTO post_meta (post_id, meta_key, meta_value) VALUES ($1, $2, $3) \
             ON CONFLICT (post_id, meta_key) DO UPDATE SET meta_value = EXCLUDED.meta_value",
        )
        .bind(db_id)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| infrastructure(&e))?;
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> Result<Option<Record>, DomainError> {
        let Some(db_id) = to_db_id(id) else {
            return Ok(None);
        };
        let sql = format!("DELETE FROM posts WHERE id = $1 RETURNING {RECORD_COLUMNS}");
        sqlx::query_as::<_, PostRow>(&sql)
            .bind(db_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?
            .map(Record::try_from)
            .transpose()
    }
}
