//! Session state types

use crate::questions::{Category, Question};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Wrong answers allowed on one question before it is revealed
pub const MAX_WRONG_ATTEMPTS: u8 = 3;

/// Where the session is in the game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the user to say their name
    #[default]
    NeedsName,
    /// Name known, waiting for a category
    NeedsCategory,
    /// A question is on the table
    InProgress,
    /// Last game finished or was ended early
    Completed,
}

/// Everything the quiz remembers about one user between turns.
///
/// Owned by the caller; the state machine reads a snapshot and returns a new
/// value each turn.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub phase: Phase,
    pub user_name: Option<String>,
    pub category: Option<Category>,
    pub score: u32,
    pub games_played: u32,
    /// Misses on the current question, always below [`MAX_WRONG_ATTEMPTS`]
    pub wrong_attempts: u8,
    pub question_queue: VecDeque<Question>,
    pub current_question: Option<Question>,
    pub start_time: Option<DateTime<Utc>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_progress(&self) -> bool {
        self.phase == Phase::InProgress
    }

    /// Milliseconds since the current game started, clamped at zero
    pub fn elapsed_millis(&self, now: DateTime<Utc>) -> Option<u64> {
        self.start_time
            .map(|start| u64::try_from((now - start).num_milliseconds()).unwrap_or(0))
    }
}
