//! In-memory session store
//!
//! Sessions live for the lifetime of the process. Each session sits behind
//! its own mutex so turns for one user run one at a time while different
//! users proceed in parallel.

use crate::state_machine::SessionState;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<SessionState>>>>,
}

impl SessionStore {
    /// Get a session, creating a fresh one on first use
    pub async fn get_or_create(&self, session_id: &str) -> Arc<Mutex<SessionState>> {
        if let Some(session) = self.sessions.read().await.get(session_id) {
            return Arc::clone(session);
        }

        let mut sessions = self.sessions.write().await;
        Arc::clone(
            sessions
                .entry(session_id.to_string())
                .or_insert_with(|| {
                    tracing::debug!(session_id = %session_id, "Creating session");
                    Arc::new(Mutex::new(SessionState::new()))
                }),
        )
    }

    /// Copy of a session's current state
    pub async fn snapshot(&self, session_id: &str) -> Option<SessionState> {
        let session = self.sessions.read().await.get(session_id).cloned()?;
        let state = session.lock().await;
        Some(state.clone())
    }

    /// Drop a session; returns whether it existed
    pub async fn remove(&self, session_id: &str) -> bool {
        self.sessions.write().await.remove(session_id).is_some()
    }
}
