//! Authorization guard for post deletion.

use tokenpost_core::error::DomainError;
use tokenpost_core::record::{RecordId, TOKEN_META_KEY};
use tokenpost_core::repository::RecordStore;
use tracing::warn;

use crate::domain::authorization::tokens_match;

/// Checks the presented token against the one stored with the post.
/// Performs no mutation.
///
/// # Errors
///
/// Returns `DomainError::DeletionDenied` if the post has no token or the
/// tokens differ, and propagates store errors.
pub async fn authorize_deletion(
    record_id: RecordId,
    presented_token: Option<&str>,
    store: &dyn RecordStore,
) -> Result<(), DomainError> {
    let stored = store.get_meta(record_id, TOKEN_META_KEY).await?;
    if tokens_match(stored.as_deref(), presented_token) {
        return Ok(());
    }
    warn!(
        post_id = record_id,
        token_presented = presented_token.is_some(),
        "post deletion denied"
    );
    Err(DomainError::DeletionDenied)
}
