//! Turn executor

use crate::questions::Presentation;
use crate::report::ResultReporter;
use crate::state_machine::{transition, Effect, Intent, SessionState, TurnContext};
use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::Serialize;

/// Everything the transport layer needs to answer the user for one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnResult {
    pub speech: String,
    pub reprompt: Option<String>,
    pub presentations: Vec<Presentation>,
}

impl TurnResult {
    fn spoken(speech: &str) -> Self {
        Self {
            speech: speech.to_string(),
            reprompt: None,
            presentations: vec![],
        }
    }
}

/// Runs turns against caller-owned session state.
///
/// Holds no per-session data, so one runtime serves every session
/// concurrently.
#[derive(Clone)]
pub struct TurnRuntime {
    reporter: ResultReporter,
}

impl TurnRuntime {
    pub fn new(reporter: ResultReporter) -> Self {
        Self { reporter }
    }

    /// Process one turn using the wall clock and a thread-local RNG
    pub fn handle_turn(
        &self,
        session_id: &str,
        state: &mut SessionState,
        intent: Intent,
    ) -> TurnResult {
        self.handle_turn_at(session_id, state, intent, Utc::now(), &mut rand::thread_rng())
    }

    /// Process one turn with an explicit clock and shuffle source.
    ///
    /// On success `state` is replaced by the transition's new state; on any
    /// transition error it is left exactly as it was and the user hears a
    /// short apology instead.
    pub fn handle_turn_at(
        &self,
        session_id: &str,
        state: &mut SessionState,
        intent: Intent,
        now: DateTime<Utc>,
        rng: &mut dyn RngCore,
    ) -> TurnResult {
        let intent_name = intent.name();
        let mut ctx = TurnContext::new(now, rng);

        let result = match transition(state, &mut ctx, intent) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    intent = intent_name,
                    error = %e,
                    "Turn rejected"
                );
                return TurnResult::spoken(e.utterance());
            }
        };

        let old_phase = state.phase;
        *state = result.new_state;

        let mut presentations = Vec::new();
        for effect in result.effects {
            match effect {
                Effect::Present(presentation) => presentations.push(presentation),
                Effect::ReportResult(report) => {
                    tracing::info!(
                        session_id = %session_id,
                        category = %report.category,
                        score = report.final_score,
                        duration_ms = report.duration_millis,
                        "Game finished"
                    );
                    self.reporter.report(report);
                }
            }
        }

        tracing::info!(
            session_id = %session_id,
            intent = intent_name,
            from = ?old_phase,
            to = ?state.phase,
            score = state.score,
            wrong_attempts = state.wrong_attempts,
            "Turn processed"
        );

        TurnResult {
            speech: result.reply.speech,
            reprompt: result.reply.reprompt,
            presentations,
        }
    }
}
