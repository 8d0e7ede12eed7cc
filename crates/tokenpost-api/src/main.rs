//! Tokenpost API server entry point.

use std::sync::{Arc, Mutex};

use sqlx::postgres::PgPoolOptions;
use tokenpost_api::config::Config;
use tokenpost_api::error::AppError;
use tokenpost_api::state::AppState;
use tokenpost_api::{build_router, telemetry};
use tokenpost_core::clock::SystemClock;
use tokenpost_core::repository::RecordStore;
use tokenpost_core::rng::SystemRng;
use tokenpost_posts::application::command_handlers::PostSettings;
use tokenpost_store::{InMemoryRecordStore, PgRecordStore};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;
    let tracer_provider = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting Tokenpost API server");

    let store: Arc<dyn RecordStore> = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await?;
            let store = PgRecordStore::new(pool);
            store.migrate().await?;
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; posts are kept in memory and lost on restart");
            Arc::new(InMemoryRecordStore::new())
        }
    };

    let app_state = AppState::new(
        store,
        Arc::new(SystemClock),
        Arc::new(Mutex::new(SystemRng::new())),
        PostSettings::default(),
    );

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(provider) = tracer_provider {
        if let Err(e) = provider.shutdown() {
            tracing::error!(error = %e, "failed to flush trace exporter");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
