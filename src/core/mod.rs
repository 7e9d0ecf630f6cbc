//! Core game types: board, players, dice, setup configuration, move history.
//!
//! Everything here is plain data with validated constructors. The rules
//! that move players live in `rules`; orchestration lives in `session`.

pub mod board;
pub mod player;
pub mod rng;
pub mod config;
pub mod state;

pub use board::{Board, Square, Teleport, TeleportKind, MAX_BOARD_SIZE};
pub use player::{validate_roster, Player, PlayerId, MAX_PLAYERS, MIN_PLAYERS};
pub use rng::{DiceRoll, DiceSource, GameRng, ScriptedDice, DIE_FACES};
pub use config::GameConfig;
pub use state::{MoveEvent, MoveLog, MoveRecord};
