//! Pure state transition function

use super::speech;
use super::state::MAX_WRONG_ATTEMPTS;
use super::{Effect, Intent, Phase, SessionState};
use crate::answer::is_correct;
use crate::questions::{draw_game, Category};
use crate::report::GameReport;
use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::Serialize;
use thiserror::Error;

/// Inputs a transition may consult besides the state: the clock and the
/// shuffle source
pub struct TurnContext<'a> {
    pub now: DateTime<Utc>,
    pub rng: &'a mut dyn RngCore,
}

impl<'a> TurnContext<'a> {
    pub fn new(now: DateTime<Utc>, rng: &'a mut dyn RngCore) -> Self {
        Self { now, rng }
    }
}

/// What to say back to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub speech: String,
    pub reprompt: Option<String>,
}

impl Reply {
    pub fn say(speech: impl Into<String>) -> Self {
        Self {
            speech: speech.into(),
            reprompt: None,
        }
    }

    pub fn ask(speech: impl Into<String>, reprompt: impl Into<String>) -> Self {
        Self {
            speech: speech.into(),
            reprompt: Some(reprompt.into()),
        }
    }
}

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub reply: Reply,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState, reply: Reply) -> Self {
        Self {
            new_state: state,
            reply,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition. The session is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("{intent} received with no current question")]
    NoCurrentQuestion { intent: &'static str },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TransitionError {
    /// What the user hears when the turn fails
    pub fn utterance(&self) -> &'static str {
        match self {
            TransitionError::NoCurrentQuestion { .. } => speech::NO_CURRENT_QUESTION,
            TransitionError::Internal(_) => speech::APOLOGY,
        }
    }
}

/// Pure transition function
///
/// Given the same state, context and intent this always produces the same
/// result; all I/O is expressed as returned effects.
pub fn transition(
    state: &SessionState,
    ctx: &mut TurnContext<'_>,
    intent: Intent,
) -> Result<TransitionResult, TransitionError> {
    match intent {
        Intent::Launch => Ok(TransitionResult::new(
            state.clone(),
            Reply::ask(speech::WELCOME, speech::WELCOME_REPROMPT),
        )),

        Intent::StartGame => start_game(state.clone(), ctx),

        Intent::CaptureName { user_name } => Ok(capture_name(state, user_name)),

        Intent::SelectCategory(category) => {
            let mut next = state.clone();
            next.category = Some(category);
            start_game(next, ctx)
        }

        Intent::Answer { answer } => answer_question(state, ctx, answer),

        Intent::EndGame => end_game(state, ctx),

        Intent::RefreshPresentation => {
            let question = state
                .current_question
                .as_ref()
                .ok_or(TransitionError::NoCurrentQuestion {
                    intent: "refresh_presentation",
                })?;
            Ok(TransitionResult::new(
                state.clone(),
                Reply::ask(
                    speech::repeat_question(question.prompt()),
                    speech::ANSWER_REPROMPT,
                ),
            )
            .with_effect(Effect::present(question.presentation())))
        }
    }
}

fn start_game(
    mut state: SessionState,
    ctx: &mut TurnContext<'_>,
) -> Result<TransitionResult, TransitionError> {
    let Some(user_name) = state.user_name.clone() else {
        state.phase = Phase::NeedsName;
        return Ok(TransitionResult::new(
            state,
            Reply::ask(speech::ASK_NAME, speech::ASK_NAME_REPROMPT),
        ));
    };

    let Some(category) = state.category else {
        state.phase = Phase::NeedsCategory;
        return Ok(TransitionResult::new(
            state,
            Reply::ask(speech::ASK_CATEGORY, speech::ASK_CATEGORY_REPROMPT),
        ));
    };

    // Every game is a full fresh draw, even when restarting mid-game
    state.question_queue = draw_game(category, &mut *ctx.rng).into();

    let first = state.question_queue.pop_front().ok_or_else(|| {
        TransitionError::Internal(format!("question bank for {category} is empty"))
    })?;

    state.score = 0;
    state.wrong_attempts = 0;
    state.games_played += 1;
    state.start_time = Some(ctx.now);
    state.phase = Phase::InProgress;

    let reply = Reply::ask(
        speech::game_started(&user_name, category, first.prompt()),
        speech::ANSWER_REPROMPT,
    );
    let effect = Effect::present(first.presentation());
    state.current_question = Some(first);

    Ok(TransitionResult::new(state, reply).with_effect(effect))
}

fn capture_name(state: &SessionState, user_name: Option<String>) -> TransitionResult {
    // Mid-game the user stays on the current question
    if let (Phase::InProgress, Some(question)) = (state.phase, &state.current_question) {
        return TransitionResult::new(
            state.clone(),
            Reply::ask(
                speech::repeat_question(question.prompt()),
                speech::ANSWER_REPROMPT,
            ),
        );
    }

    // The name is set once per session
    if let Some(existing) = &state.user_name {
        return TransitionResult::new(
            state.clone(),
            Reply::ask(
                speech::greet_and_ask_category(existing),
                speech::ASK_CATEGORY_REPROMPT,
            ),
        );
    }

    let Some(name) = user_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
    else {
        return TransitionResult::new(
            state.clone(),
            Reply::ask(
                speech::NAME_NOT_CAPTURED,
                speech::NAME_NOT_CAPTURED_REPROMPT,
            ),
        );
    };

    let mut next = state.clone();
    next.phase = Phase::NeedsCategory;
    let reply = Reply::ask(
        speech::greet_and_ask_category(&name),
        speech::ASK_CATEGORY_REPROMPT,
    );
    next.user_name = Some(name);
    TransitionResult::new(next, reply)
}

fn answer_question(
    state: &SessionState,
    ctx: &TurnContext<'_>,
    answer: Option<String>,
) -> Result<TransitionResult, TransitionError> {
    let question = state
        .current_question
        .as_ref()
        .ok_or(TransitionError::NoCurrentQuestion { intent: "answer" })?;

    let Some(answer) = answer.filter(|a| !a.trim().is_empty()) else {
        return Ok(TransitionResult::new(
            state.clone(),
            Reply::ask(speech::ANSWER_NOT_HEARD, speech::ANSWER_REPROMPT),
        ));
    };

    let mut next = state.clone();

    if is_correct(&answer, question.correct_answer()) {
        next.score += 1;
        next.wrong_attempts = 0;
        return advance(next, ctx, speech::CORRECT);
    }

    next.wrong_attempts += 1;
    if next.wrong_attempts < MAX_WRONG_ATTEMPTS {
        let reply = Reply::ask(
            speech::wrong_attempt(next.wrong_attempts),
            speech::ANSWER_REPROMPT,
        );
        return Ok(TransitionResult::new(next, reply));
    }

    // Out of attempts: reveal and move on without scoring
    next.wrong_attempts = 0;
    advance(next, ctx, &speech::reveal(question.label()))
}

/// Serve the next queued question, or finish the game if none remain
fn advance(
    mut state: SessionState,
    ctx: &TurnContext<'_>,
    lead: &str,
) -> Result<TransitionResult, TransitionError> {
    let Some(next) = state.question_queue.pop_front() else {
        return finish(state, ctx, Some(lead));
    };

    let reply = Reply::ask(
        speech::next_question(lead, next.prompt()),
        speech::ANSWER_REPROMPT,
    );
    let effect = Effect::present(next.presentation());
    state.current_question = Some(next);
    Ok(TransitionResult::new(state, reply).with_effect(effect))
}

fn end_game(
    state: &SessionState,
    ctx: &TurnContext<'_>,
) -> Result<TransitionResult, TransitionError> {
    if !state.is_in_progress() {
        return Ok(TransitionResult::new(
            state.clone(),
            Reply::ask(speech::NO_GAME_IN_PROGRESS, speech::WELCOME_REPROMPT),
        ));
    }
    finish(state.clone(), ctx, None)
}

/// Close out the current game and emit its report
fn finish(
    mut state: SessionState,
    ctx: &TurnContext<'_>,
    lead: Option<&str>,
) -> Result<TransitionResult, TransitionError> {
    let report = build_report(&state, ctx.now)?;

    state.phase = Phase::Completed;
    state.current_question = None;
    state.question_queue.clear();
    state.wrong_attempts = 0;

    let reply = Reply::say(speech::final_score(lead, state.score));
    Ok(TransitionResult::new(state, reply).with_effect(Effect::ReportResult(report)))
}

fn build_report(state: &SessionState, now: DateTime<Utc>) -> Result<GameReport, TransitionError> {
    let missing = |field: &str| TransitionError::Internal(format!("game in progress without {field}"));

    let user_name = state.user_name.clone().ok_or_else(|| missing("user name"))?;
    let category: Category = state.category.ok_or_else(|| missing("category"))?;
    let duration_millis = state
        .elapsed_millis(now)
        .ok_or_else(|| missing("start time"))?;

    Ok(GameReport {
        user_name,
        finished_at: now,
        duration_millis,
        final_score: state.score,
        category,
    })
}
