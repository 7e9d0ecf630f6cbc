//! # snakes-ladders
//!
//! A Snakes and Ladders engine: board and turn rules, multi-player
//! sessions, save/resume, text renderings and a console front end.
//!
//! ## Design Principles
//!
//! 1. **Pure Turn Rules**: `TurnEngine::resolve_turn` is a function of
//!    board, player and roll. No I/O, no randomness.
//!
//! 2. **Injected Collaborators**: dice come from a `DiceSource`, per-move
//!    output goes to a `MoveSink`. Seeded or scripted dice make whole games
//!    reproducible.
//!
//! 3. **Validated Construction**: boards, rosters and restored snapshots are
//!    checked when built, so a running session cannot reach an invalid state.
//!
//! ## Modules
//!
//! - `core`: board, players, dice, move log, game configuration
//! - `rules`: the turn engine
//! - `session`: turn orchestration and move sinks
//! - `persistence`: versioned snapshots, repositories, history dump
//! - `presentation`: board, path and heatmap renderings
//! - `cli`: prompts, runtime configuration and the interactive loop
//! - `error`: error taxonomy

pub mod cli;
pub mod core;
pub mod error;
pub mod persistence;
pub mod presentation;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Board, DiceRoll, DiceSource, GameConfig, GameRng, MoveEvent, MoveLog, MoveRecord, Player,
    PlayerId, ScriptedDice, Square, Teleport, TeleportKind,
};

pub use crate::rules::{TurnEngine, TurnOutcome, TurnStatus};

pub use crate::session::{FileMoveSink, GameSession, MemorySink, MoveSink, NullSink, TracingSink};

pub use crate::persistence::{
    FileSnapshotRepository, MemorySnapshotRepository, SessionSnapshot, SnapshotFormat,
    SnapshotRepository,
};

pub use crate::error::{
    ConfigurationError, Error, InputError, PersistenceError, Result, SinkError,
};
