//! Tokenpost API — HTTP surface for token-guarded post creation and deletion.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::Router;

use crate::state::AppState;

/// Path prefix shared by the post routes.
pub const API_PREFIX: &str = "/custom-api-route";

/// Builds the application router. Layers are added by the caller.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest(API_PREFIX, routes::posts::router())
        .with_state(app_state)
}
