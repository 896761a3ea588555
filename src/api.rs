//! HTTP API for the quiz service
//!
//! Accepts recognized intents as JSON, runs them against the session store
//! and returns the turn result for the voice platform to render.

mod handlers;
mod sessions;
mod types;

pub use handlers::create_router;

use crate::runtime::TurnRuntime;
use sessions::SessionStore;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub runtime: TurnRuntime,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(runtime: TurnRuntime) -> Self {
        Self {
            runtime,
            sessions: Arc::new(SessionStore::default()),
        }
    }
}
