//! API request and response types

use crate::runtime::TurnResult;
use crate::state_machine::Phase;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One recognized user turn
#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    /// Omit to start a new session
    #[serde(default)]
    pub session_id: Option<String>,
    pub intent: String,
    #[serde(default)]
    pub slots: HashMap<String, String>,
}

/// Reply for one turn
#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub session_id: String,
    pub phase: Phase,
    pub score: u32,
    #[serde(flatten)]
    pub result: TurnResult,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Response for lifecycle actions
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
