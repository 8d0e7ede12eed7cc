//! Command handlers for the Posts context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: sanitize, validate, mutate the store.

use std::fmt;
use std::sync::Mutex;

use tokenpost_core::clock::Clock;
use tokenpost_core::command::Command;
use tokenpost_core::error::DomainError;
use tokenpost_core::record::{NewRecord, Record, RecordId, RecordStatus, TOKEN_META_KEY};
use tokenpost_core::repository::RecordStore;
use tokenpost_core::rng::DeterministicRng;
use tracing::{error, info};

use crate::application::authorization::authorize_deletion;
use crate::domain::commands::{CreatePost, DeletePost};
use crate::domain::sanitize::{sanitize_content, sanitize_title};
use crate::domain::token::{TokenPolicy, issue_token};
use crate::domain::validation::{ValidationRules, parse_post_id};

/// Tunables for post creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostSettings {
    /// Title and content bounds.
    pub validation: ValidationRules,
    /// Shape of issued deletion tokens.
    pub token: TokenPolicy,
}

/// Result of a successful creation. Carries the only copy of the token the
/// caller will ever see.
#[derive(Clone, PartialEq, Eq)]
pub struct CreatedPost {
    /// Identifier assigned by the store.
    pub id: RecordId,
    /// Deletion token.
    pub token: String,
}

impl fmt::Debug for CreatedPost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatedPost")
            .field("id", &self.id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Fails if a post with exactly this title already exists.
///
/// # Errors
///
/// Returns `DomainError::DuplicateTitle`, or propagates store errors.
pub async fn check_duplicate(title: &str, store: &dyn RecordStore) -> Result<(), DomainError> {
    match store.find_by_title(title).await? {
        Some(_) => Err(DomainError::DuplicateTitle),
        None => Ok(()),
    }
}

/// Handles the `CreatePost` command: sanitizes the input, validates it,
/// inserts a private post and attaches a freshly issued token.
///
/// Checks run in order: title, duplicate title, content.
///
/// # Errors
///
/// Returns the first failing validation error, `DomainError::CreationFailed`
/// if the store cannot persist the post or its token, or propagates store
/// read errors.
pub async fn handle_create_post(
    command: &CreatePost,
    settings: &PostSettings,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
    store: &dyn RecordStore,
) -> Result<CreatedPost, DomainError> {
    let title = sanitize_title(&command.title);
    let content = sanitize_content(&command.content);

    settings.validation.validate_title(&title)?;
    check_duplicate(&title, store).await?;
    settings.validation.validate_content(&content)?;

    let new_record = NewRecord {
        title,
        content,
        status: RecordStatus::Private,
        created_at: clock.now(),
    };
    let record = match store.insert(new_record).await {
        Ok(record) => record,
        Err(DomainError::DuplicateTitle) => return Err(DomainError::DuplicateTitle),
        Err(err) => {
            error!(
                correlation_id = %command.correlation_id(),
                error = %err,
                "post insert failed"
            );
            return Err(DomainError::CreationFailed);
        }
    };

    let token = {
        let mut rng = rng
            .lock()
            .map_err(|_| DomainError::Infrastructure("rng lock poisoned".into()))?;
        issue_token(&settings.token, &mut *rng)
    };

    if let Err(err) = store.put_meta(record.id, TOKEN_META_KEY, &token).await {
        error!(
            correlation_id = %command.correlation_id(),
            post_id = record.id,
            error = %err,
            "storing post token failed; removing post"
        );
        if let Err(rollback_err) = store.delete(record.id).await {
            error!(post_id = record.id, error = %rollback_err, "removing tokenless post failed");
        }
        return Err(DomainError::CreationFailed);
    }

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        post_id = record.id,
        "post created"
    );

    Ok(CreatedPost {
        id: record.id,
        token,
    })
}

/// Handles the `DeletePost` command: resolves the post, checks the token and
/// permanently removes the post.
///
/// Returns the removed post, or `None` if the store removed nothing.
///
/// # Errors
///
/// Returns `DomainError::InvalidIdFormat`, `DomainError::RecordNotFound` or
/// `DomainError::DeletionDenied`, or propagates store errors.
pub async fn handle_delete_post(
    command: &DeletePost,
    store: &dyn RecordStore,
) -> Result<Option<Record>, DomainError> {
    let id = parse_post_id(&command.post_id)?.ok_or(DomainError::RecordNotFound)?;
    if store.find_by_id(id).await?.is_none() {
        return Err(DomainError::RecordNotFound);
    }

    authorize_deletion(id, command.token.as_deref(), store).await?;

    let deleted = store.delete(id).await?;

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id(),
        post_id = id,
        deleted = deleted.is_some(),
        "post deletion handled"
    );

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tokenpost_core::clock::Clock;
    use tokenpost_core::error::DomainError;
    use tokenpost_core::record::{RecordStatus, TOKEN_META_KEY};
    use tokenpost_core::repository::RecordStore;
    use tokenpost_core::rng::DeterministicRng;
    use tokenpost_store::InMemoryRecordStore;
    use tokenpost_test_support::{
        FailingRecordStore, FaultInjectingRecordStore, FixedClock, MockRng, SequenceRng,
    };
    use uuid::Uuid;

    use super::*;

    const TITLE: &str = "A valid test title";
    const CONTENT: &str = "This is sufficiently long content.";

    fn create_command(title: &str, content: &str) -> CreatePost {
        CreatePost {
            correlation_id: Uuid::new_v4(),
            title: title.to_owned(),
            content: content.to_owned(),
        }
    }

    fn delete_command(post_id: &str, token: Option<&str>) -> DeletePost {
        DeletePost {
            correlation_id: Uuid::new_v4(),
            post_id: post_id.to_owned(),
            token: token.map(str::to_owned),
        }
    }

    fn mock_rng() -> Arc<Mutex<dyn DeterministicRng + Send>> {
        Arc::new(Mutex::new(MockRng))
    }

    async fn create(
        store: &dyn RecordStore,
        title: &str,
        content: &str,
    ) -> Result<CreatedPost, DomainError> {
        let clock = FixedClock::standard();
        handle_create_post(
            &create_command(title, content),
            &PostSettings::default(),
            &clock,
            &*mock_rng(),
            store,
        )
        .await
    }

    // --- creation ---

    #[tokio::test]
    async fn test_create_post_persists_private_post_with_token() {
        // Arrange
        let store = InMemoryRecordStore::new();
        let clock = FixedClock::standard();

        // Act
        let created = create(&store, TITLE, CONTENT).await.unwrap();

        // Assert
        assert_eq!(created.id, 1);
        assert_eq!(created.token, "a".repeat(12));

        let record = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(record.title, TITLE);
        assert_eq!(record.content, CONTENT);
        assert_eq!(record.status, RecordStatus::Private);
        assert_eq!(record.created_at, clock.now());

        let stored_token = store.get_meta(created.id, TOKEN_META_KEY).await.unwrap();
        assert_eq!(stored_token.as_deref(), Some(created.token.as_str()));
    }

    #[tokio::test]
    async fn test_create_post_uses_injected_rng_for_token() {
        // Arrange
        let store = InMemoryRecordStore::new();
        let clock = FixedClock::standard();
        let mut draws = vec![13];
        draws.extend([26; 13]);
        let rng: Arc<Mutex<dyn DeterministicRng + Send>> =
            Arc::new(Mutex::new(SequenceRng::new(draws)));

        // Act
        let created = handle_create_post(
            &create_command(TITLE, CONTENT),
            &PostSettings::default(),
            &clock,
            &*rng,
            &store,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(created.token, "A".repeat(13));
    }

    #[tokio::test]
    async fn test_create_post_stores_sanitized_values() {
        // Arrange
        let store = InMemoryRecordStore::new();

        // Act
        let created = create(
            &store,
            "<em>A valid</em> test title",
            "<p>This is <strong>long</strong> enough content.</p><script>alert(1)</script>",
        )
        .await
        .unwrap();

        // Assert
        let record = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(record.title, "A valid test title");
        assert_eq!(
            record.content,
            "<p>This is <strong>long</strong> enough content.</p>"
        );
    }

    #[tokio::test]
    async fn test_create_post_validates_sanitized_title() {
        let store = InMemoryRecordStore::new();

        // 16 raw characters, 5 once the markup is gone.
        let result = create(&store, "<b>Short</b>    ", CONTENT).await;

        assert_eq!(result, Err(DomainError::InvalidTitle { min: 10, max: 50 }));
    }

    #[tokio::test]
    async fn test_create_post_rejects_out_of_range_titles() {
        let store = InMemoryRecordStore::new();

        for title in ["", "too short", &"x".repeat(51)] {
            let result = create(&store, title, CONTENT).await;
            assert_eq!(
                result,
                Err(DomainError::InvalidTitle { min: 10, max: 50 }),
                "title {title:?}"
            );
        }
        assert!(store.find_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_post_rejects_short_content() {
        let store = InMemoryRecordStore::new();

        let result = create(&store, TITLE, "too short").await;

        assert_eq!(result, Err(DomainError::InvalidContent { min: 20 }));
        assert!(store.find_by_title(TITLE).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_post_rejects_duplicate_title() {
        let store = InMemoryRecordStore::new();
        create(&store, TITLE, CONTENT).await.unwrap();

        let result = create(&store, TITLE, CONTENT).await;

        assert_eq!(result, Err(DomainError::DuplicateTitle));
    }

    #[tokio::test]
    async fn test_create_post_reports_errors_in_check_order() {
        let store = InMemoryRecordStore::new();
        create(&store, TITLE, CONTENT).await.unwrap();

        // Bad title wins over bad content.
        assert_eq!(
            create(&store, "short", "short").await,
            Err(DomainError::InvalidTitle { min: 10, max: 50 })
        );
        // Duplicate title wins over bad content.
        assert_eq!(
            create(&store, TITLE, "short").await,
            Err(DomainError::DuplicateTitle)
        );
    }

    #[tokio::test]
    async fn test_create_post_reports_duplicate_when_insert_hits_unique_title() {
        // Arrange: the read-side check passes, the insert conflicts.
        let store = FaultInjectingRecordStore::losing_title_race();

        // Act
        let result = create(&store, TITLE, CONTENT).await;

        // Assert
        assert_eq!(result, Err(DomainError::DuplicateTitle));
        assert!(store.find_by_title(TITLE).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_post_stores_unterminated_angle_as_text() {
        // Arrange
        let store = InMemoryRecordStore::new();

        // Act
        let created = create(&store, "1 < 2 <is always true", CONTENT)
            .await
            .unwrap();

        // Assert
        let record = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(record.title, "1 &lt; 2 &lt;is always true");
    }

    #[tokio::test]
    async fn test_create_post_maps_insert_failure_to_creation_failed() {
        let store = FaultInjectingRecordStore::rejecting_inserts();

        let result = create(&store, TITLE, CONTENT).await;

        assert_eq!(result, Err(DomainError::CreationFailed));
    }

    #[tokio::test]
    async fn test_create_post_removes_post_when_token_cannot_be_stored() {
        let store = FaultInjectingRecordStore::rejecting_metadata();

        let result = create(&store, TITLE, CONTENT).await;

        assert_eq!(result, Err(DomainError::CreationFailed));
        assert!(store.find_by_title(TITLE).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_post_propagates_store_read_failure() {
        let result = create(&FailingRecordStore, TITLE, CONTENT).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    // --- deletion ---

    #[tokio::test]
    async fn test_delete_post_with_matching_token_removes_post() {
        // Arrange
        let store = InMemoryRecordStore::new();
        let created = create(&store, TITLE, CONTENT).await.unwrap();

        // Act
        let deleted = handle_delete_post(
            &delete_command(&created.id.to_string(), Some(&created.token)),
            &store,
        )
        .await
        .unwrap();

        // Assert
        let deleted = deleted.unwrap();
        assert_eq!(deleted.id, created.id);
        assert_eq!(deleted.title, TITLE);
        assert!(store.find_by_id(created.id).await.unwrap().is_none());
        assert!(
            store
                .get_meta(created.id, TOKEN_META_KEY)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_post_rejects_non_digit_id() {
        let store = InMemoryRecordStore::new();

        let result = handle_delete_post(&delete_command("12a", Some("token")), &store).await;

        assert_eq!(result, Err(DomainError::InvalidIdFormat));
    }

    #[tokio::test]
    async fn test_delete_post_unknown_id_is_not_found() {
        let store = InMemoryRecordStore::new();

        for post_id in ["999", "99999999999999999999999"] {
            let result = handle_delete_post(&delete_command(post_id, Some("token")), &store).await;
            assert_eq!(result, Err(DomainError::RecordNotFound), "id {post_id}");
        }
    }

    #[tokio::test]
    async fn test_delete_post_wrong_or_missing_token_leaves_post() {
        // Arrange
        let store = InMemoryRecordStore::new();
        let created = create(&store, TITLE, CONTENT).await.unwrap();
        let post_id = created.id.to_string();

        // Act
        let wrong = handle_delete_post(&delete_command(&post_id, Some("wrong")), &store).await;
        let missing = handle_delete_post(&delete_command(&post_id, None), &store).await;

        // Assert
        assert_eq!(wrong, Err(DomainError::DeletionDenied));
        assert_eq!(missing, Err(DomainError::DeletionDenied));
        assert!(store.find_by_id(created.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_post_twice_reports_not_found() {
        let store = InMemoryRecordStore::new();
        let created = create(&store, TITLE, CONTENT).await.unwrap();
        let command = delete_command(&created.id.to_string(), Some(&created.token));

        handle_delete_post(&command, &store).await.unwrap();
        let second = handle_delete_post(&command, &store).await;

        assert_eq!(second, Err(DomainError::RecordNotFound));
    }

    #[tokio::test]
    async fn test_created_post_debug_redacts_token() {
        let store = InMemoryRecordStore::new();
        let created = create(&store, TITLE, CONTENT).await.unwrap();

        let rendered = format!("{created:?}");

        assert!(!rendered.contains(&created.token));
    }
}
