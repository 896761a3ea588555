//! Quiz session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! every intent maps the current `SessionState` to a new one plus a reply
//! and a list of effects for the runtime to carry out.

mod effect;
pub mod event;
mod speech;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Intent;
pub use state::{Phase, SessionState};
pub use transition::{transition, TurnContext};
