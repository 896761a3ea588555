//! Intents that drive session transitions

use crate::questions::Category;
use std::collections::HashMap;
use thiserror::Error;

/// A recognized user action for one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Launch,
    StartGame,
    CaptureName { user_name: Option<String> },
    SelectCategory(Category),
    Answer { answer: Option<String> },
    EndGame,
    RefreshPresentation,
}

/// Errors turning a raw intent name and slots into an [`Intent`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentParseError {
    #[error("Unknown intent: {0}")]
    UnknownIntent(String),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Missing slot: {0}")]
    MissingSlot(&'static str),
}

impl Intent {
    /// Intent name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Launch => "launch",
            Intent::StartGame => "start_game",
            Intent::CaptureName { .. } => "capture_name",
            Intent::SelectCategory(_) => "select_category",
            Intent::Answer { .. } => "answer",
            Intent::EndGame => "end_game",
            Intent::RefreshPresentation => "refresh_presentation",
        }
    }

    /// Parse from an intent name and its slot values.
    ///
    /// Accepts both the short names and the skill's `*Intent` names. Empty
    /// slot values are treated as absent.
    pub fn from_name_and_slots(
        name: &str,
        slots: &HashMap<String, String>,
    ) -> Result<Self, IntentParseError> {
        let slot = |key: &str| {
            slots
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        match name {
            "Launch" | "LaunchRequest" => Ok(Intent::Launch),
            "StartGame" | "StartGameIntent" => Ok(Intent::StartGame),
            "CaptureName" | "CaptureNameIntent" => Ok(Intent::CaptureName {
                user_name: slot("userName"),
            }),
            "ColorCategoryIntent" => Ok(Intent::SelectCategory(Category::Colors)),
            "AnimalCategoryIntent" => Ok(Intent::SelectCategory(Category::Animals)),
            "SelectCategory" => {
                let token = slot("category").ok_or(IntentParseError::MissingSlot("category"))?;
                Category::from_token(&token)
                    .map(Intent::SelectCategory)
                    .ok_or(IntentParseError::UnknownCategory(token))
            }
            "Answer" | "AnswerIntent" => Ok(Intent::Answer {
                answer: slot("answer"),
            }),
            "EndGame" | "EndGameIntent" => Ok(Intent::EndGame),
            "RefreshPresentation" | "UpdateScreenIntent" => Ok(Intent::RefreshPresentation),
            other => Err(IntentParseError::UnknownIntent(other.to_string())),
        }
    }
}
