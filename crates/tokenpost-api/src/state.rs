//! Shared application state.

use std::sync::{Arc, Mutex};

use tokenpost_core::clock::Clock;
use tokenpost_core::repository::RecordStore;
use tokenpost_core::rng::DeterministicRng;
use tokenpost_posts::application::command_handlers::PostSettings;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Record store holding posts and their tokens.
    pub store: Arc<dyn RecordStore>,
    /// Clock stamping new posts.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// RNG used to issue deletion tokens.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Validation bounds and token policy.
    pub settings: Arc<PostSettings>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock + Send + Sync>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        settings: PostSettings,
    ) -> Self {
        Self {
            store,
            clock,
            rng,
            settings: Arc::new(settings),
        }
    }
}
