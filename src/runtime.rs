//! Runtime for executing quiz turns
//!
//! Applies the pure state machine to a caller-owned session and carries out
//! the resulting effects.

mod executor;


pub use executor::{TurnResult, TurnRuntime};
