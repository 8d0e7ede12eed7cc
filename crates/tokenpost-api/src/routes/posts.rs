//! Routes for creating and deleting posts.
//!
//! Creation is open to anyone. Deletion always runs the token guard: the
//! caller must present, in the `X-WP-TOKEN` header, the token returned when
//! the post was created.

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use tokenpost_core::error::DomainError;
use tokenpost_core::record::{Record, RecordId};
use tokenpost_posts::application::command_handlers;
use tokenpost_posts::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the deletion token.
pub const TOKEN_HEADER: &str = "x-wp-token";

/// Fields accepted by POST /create. Missing or `null` fields are treated
/// as empty.
#[derive(Debug, Default, Deserialize)]
pub struct CreatePostRequest {
    /// Raw title.
    #[serde(default)]
    pub title: Option<String>,
    /// Raw content.
    #[serde(default)]
    pub content: Option<String>,
}

/// Extracts a `CreatePostRequest` from a JSON or URL-encoded form body.
/// A request without a content type carries no fields.
#[derive(Debug)]
pub struct CreatePostBody(pub CreatePostRequest);

impl<S> FromRequest<S> for CreatePostBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_ascii_lowercase);

        match content_type.as_deref() {
            None => Ok(Self(CreatePostRequest::default())),
            Some(ct) if ct.starts_with("application/json") => {
                let Json(body) = Json::<CreatePostRequest>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError(DomainError::MalformedRequest(e.body_text())))?;
                Ok(Self(body))
            }
            Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
                let Form(body) = Form::<CreatePostRequest>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError(DomainError::MalformedRequest(e.body_text())))?;
                Ok(Self(body))
            }
            Some(other) => Err(ApiError(DomainError::MalformedRequest(format!(
                "unsupported content type {other}"
            )))),
        }
    }
}

/// Identifier and token of a freshly created post.
#[derive(Debug, Serialize)]
pub struct CreatedPostBody {
    /// Post identifier.
    pub id: RecordId,
    /// Deletion token. Never returned again.
    pub token: String,
}

/// Response body for POST /create.
#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    /// Always `true`; failures use the error envelope.
    pub success: bool,
    /// The created post.
    pub post: CreatedPostBody,
}

/// Response body for DELETE /delete/{post_id}.
#[derive(Debug, Serialize)]
pub struct DeletePostResponse {
    /// Whether a post was actually removed.
    pub success: bool,
    /// The removed post, without its token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Record>,
}

/// POST /create
#[instrument(skip_all)]
async fn create_post(
    State(state): State<AppState>,
    CreatePostBody(request): CreatePostBody,
) -> Result<(StatusCode, Json<CreatePostResponse>), ApiError> {
    let command = commands::CreatePost {
        correlation_id: Uuid::new_v4(),
        title: request.title.unwrap_or_default(),
        content: request.content.unwrap_or_default(),
    };

    info!(correlation_id = %command.correlation_id, "handling create_post command");

    let created = command_handlers::handle_create_post(
        &command,
        &state.settings,
        state.clock.as_ref(),
        &state.rng,
        &*state.store,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            success: true,
            post: CreatedPostBody {
                id: created.id,
                token: created.token,
            },
        }),
    ))
}

/// DELETE /delete/{post_id}
#[instrument(skip_all, fields(post_id = tracing::field::Empty))]
async fn delete_post(
    State(state): State<AppState>,
    post_id: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
) -> Result<Json<DeletePostResponse>, ApiError> {
    // A segment that does not even decode cannot be made of digits.
    let Path(post_id) = post_id.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "undecodable post id");
        ApiError(DomainError::InvalidIdFormat)
    })?;
    tracing::Span::current().record("post_id", post_id.as_str());

    let token = headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let command = commands::DeletePost {
        correlation_id: Uuid::new_v4(),
        post_id,
        token,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_post command");

    let deleted = command_handlers::handle_delete_post(&command, &*state.store).await?;

    Ok(Json(DeletePostResponse {
        success: deleted.is_some(),
        post: deleted,
    }))
}

/// Returns the router for the post endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_post))
        .route("/create/", post(create_post))
        .route("/delete/{post_id}", delete(delete_post))
}
