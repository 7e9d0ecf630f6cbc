//! Game rules: the turn-resolution state machine.

pub mod engine;

pub use engine::{TurnEngine, TurnOutcome, TurnStatus};
