//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::MAX_WRONG_ATTEMPTS;
use super::transition::{TransitionError, TransitionResult};
use super::*;
use crate::questions::{bank_entries, Category, GAME_LENGTH};
use crate::report::GameReport;
use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

// ============================================================================
// Test Helpers
// ============================================================================

struct Driver {
    rng: StdRng,
    now: DateTime<Utc>,
    state: SessionState,
    reports: Vec<GameReport>,
}

impl Driver {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            now: Utc::now(),
            state: SessionState::new(),
            reports: vec![],
        }
    }

    /// Apply an intent the way the runtime does: keep the old state on error
    fn apply(&mut self, intent: Intent) -> Option<TransitionResult> {
        self.now += Duration::milliseconds(250);
        let mut ctx = TurnContext::new(self.now, &mut self.rng);
        let result = transition(&self.state, &mut ctx, intent).ok()?;
        self.state = result.new_state.clone();
        for effect in &result.effects {
            if let Effect::ReportResult(report) = effect {
                self.reports.push(report.clone());
            }
        }
        Some(result)
    }

    fn start(&mut self, category: Category) {
        self.apply(Intent::Launch);
        self.apply(Intent::CaptureName {
            user_name: Some("Ana".to_string()),
        });
        self.apply(Intent::SelectCategory(category));
    }

    fn correct_answer(&self) -> String {
        self.state
            .current_question
            .as_ref()
            .map(|q| q.correct_answer().to_string())
            .unwrap_or_default()
    }

    fn answer(&mut self, text: &str) -> Option<TransitionResult> {
        self.apply(Intent::Answer {
            answer: Some(text.to_string()),
        })
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_category() -> impl Strategy<Value = Category> {
    prop_oneof![Just(Category::Colors), Just(Category::Animals)]
}

fn arb_answer_text() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        "[a-záéíóú ]{0,12}".prop_map(Some),
        prop_oneof![Just("rojo"), Just("León"), Just("AZUL"), Just("gato")]
            .prop_map(|s| Some(s.to_string())),
    ]
}

fn arb_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        Just(Intent::Launch),
        Just(Intent::StartGame),
        prop_oneof![Just(None), "[A-Za-z]{0,8}".prop_map(Some)]
            .prop_map(|user_name| Intent::CaptureName { user_name }),
        arb_category().prop_map(Intent::SelectCategory),
        arb_answer_text().prop_map(|answer| Intent::Answer { answer }),
        Just(Intent::EndGame),
        Just(Intent::RefreshPresentation),
    ]
}

/// Per-question outcome: answered right, or missed three times
fn arb_outcomes() -> impl Strategy<Value = Vec<bool>> {
    proptest::collection::vec(any::<bool>(), GAME_LENGTH)
}

// ============================================================================
// State Validity Checkers
// ============================================================================

fn is_valid_state(state: &SessionState) -> bool {
    if state.wrong_attempts >= MAX_WRONG_ATTEMPTS {
        return false;
    }
    if state.score > u32::try_from(GAME_LENGTH).unwrap_or(u32::MAX) {
        return false;
    }
    match state.phase {
        Phase::InProgress => {
            state.current_question.is_some()
                && state.category.is_some()
                && state.user_name.is_some()
                && state.start_time.is_some()
        }
        Phase::Completed => state.current_question.is_none() && state.question_queue.is_empty(),
        Phase::NeedsName | Phase::NeedsCategory => state.current_question.is_none(),
    }
}

fn effects_are_valid(effects: &[Effect], new_state: &SessionState) -> bool {
    let reports = effects
        .iter()
        .filter(|e| matches!(e, Effect::ReportResult(_)))
        .count();
    let presents = effects
        .iter()
        .filter(|e| matches!(e, Effect::Present(_)))
        .count();

    // A report only ever closes a game, and a finished game shows nothing
    if reports > 0 && (reports != 1 || new_state.phase != Phase::Completed || presents != 0) {
        return false;
    }
    presents <= 1
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: Valid state after any sequence of intents
    #[test]
    fn prop_transitions_preserve_validity(
        seed in any::<u64>(),
        intents in proptest::collection::vec(arb_intent(), 0..40)
    ) {
        let mut driver = Driver::new(seed);
        for intent in intents {
            let before = driver.state.clone();
            let mut ctx = TurnContext::new(driver.now, &mut driver.rng);
            match transition(&before, &mut ctx, intent) {
                Ok(result) => {
                    prop_assert!(is_valid_state(&result.new_state), "Invalid state: {:?}", result.new_state);
                    prop_assert!(
                        effects_are_valid(&result.effects, &result.new_state),
                        "Invalid effects for state {:?}: {:?}",
                        result.new_state,
                        result.effects
                    );
                    prop_assert!(result.new_state.score >= before.score || result.new_state.score == 0);
                    if result.new_state.games_played > before.games_played {
                        // Each game, including restarts, starts with a full draw
                        let drawn = result.new_state.question_queue.len()
                            + usize::from(result.new_state.current_question.is_some());
                        prop_assert_eq!(drawn, GAME_LENGTH);
                    }
                    driver.state = result.new_state;
                }
                Err(_) => { /* Rejected turns leave the state as it was */ }
            }
        }
    }

    // Invariant 2: N correct answers in a row score N
    #[test]
    fn prop_consecutive_correct_answers_score_n(
        seed in any::<u64>(),
        category in arb_category(),
        n in 0usize..=GAME_LENGTH
    ) {
        let mut driver = Driver::new(seed);
        driver.start(category);
        for _ in 0..n {
            let correct = driver.correct_answer();
            prop_assert!(driver.answer(&correct).is_some());
        }
        prop_assert_eq!(driver.state.score, u32::try_from(n).unwrap());
        prop_assert_eq!(driver.state.wrong_attempts, 0);
    }

    // Invariant 3: Every resolved game completes and reports exactly once
    #[test]
    fn prop_completed_game_reports_once(
        seed in any::<u64>(),
        category in arb_category(),
        outcomes in arb_outcomes()
    ) {
        let mut driver = Driver::new(seed);
        driver.start(category);
        for correct in &outcomes {
            if *correct {
                let answer = driver.correct_answer();
                driver.answer(&answer);
            } else {
                for _ in 0..MAX_WRONG_ATTEMPTS {
                    driver.answer("no-es-una-respuesta");
                    prop_assert!(driver.state.wrong_attempts < MAX_WRONG_ATTEMPTS);
                }
            }
        }

        let expected = u32::try_from(outcomes.iter().filter(|c| **c).count()).unwrap();
        prop_assert_eq!(driver.state.phase, Phase::Completed);
        prop_assert_eq!(driver.state.score, expected);
        prop_assert_eq!(driver.reports.len(), 1);
        prop_assert_eq!(driver.reports[0].final_score, expected);
        prop_assert_eq!(driver.reports[0].category, category);
    }

    // Invariant 4: Selecting a category queues ten distinct questions from it
    #[test]
    fn prop_category_selection_draws_distinct_questions(
        seed in any::<u64>(),
        category in arb_category()
    ) {
        let mut driver = Driver::new(seed);
        driver.start(category);

        let drawn: Vec<String> = driver
            .state
            .current_question
            .iter()
            .chain(driver.state.question_queue.iter())
            .map(|q| q.correct_answer().to_string())
            .collect();
        let unique: HashSet<&String> = drawn.iter().collect();
        let bank: HashSet<String> = bank_entries(category)
            .into_iter()
            .map(|e| e.correct_answer)
            .collect();

        prop_assert_eq!(drawn.len(), GAME_LENGTH);
        prop_assert_eq!(unique.len(), GAME_LENGTH);
        prop_assert!(drawn.iter().all(|a| bank.contains(a)));
    }

    // Invariant 5: Wrong answers never push the counter past two
    #[test]
    fn prop_wrong_attempts_reset_on_third_miss(
        seed in any::<u64>(),
        misses in 1usize..30
    ) {
        let mut driver = Driver::new(seed);
        driver.start(Category::Colors);
        for i in 1..=misses {
            if driver.state.phase != Phase::InProgress {
                break;
            }
            let asked = driver.state.current_question.clone();
            driver.answer("xyz");
            prop_assert!(driver.state.wrong_attempts < MAX_WRONG_ATTEMPTS);
            if i % usize::from(MAX_WRONG_ATTEMPTS) == 0 {
                prop_assert_eq!(driver.state.wrong_attempts, 0);
                prop_assert_ne!(&driver.state.current_question, &asked);
            }
        }
        prop_assert_eq!(driver.state.score, 0);
    }

    // Invariant 6: Rejected turns never change the session
    #[test]
    fn prop_protocol_violations_leave_state_untouched(
        seed in any::<u64>(),
        answer in arb_answer_text()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ctx = TurnContext::new(Utc::now(), &mut rng);
        let state = SessionState {
            user_name: Some("Ana".to_string()),
            phase: Phase::Completed,
            score: 4,
            ..SessionState::default()
        };
        for intent in [Intent::Answer { answer: answer.clone() }, Intent::RefreshPresentation] {
            let rejected = matches!(
                transition(&state, &mut ctx, intent),
                Err(TransitionError::NoCurrentQuestion { .. })
            );
            prop_assert!(rejected);
        }
    }
}
