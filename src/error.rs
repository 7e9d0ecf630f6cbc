//! Error taxonomy.
//!
//! - `ConfigurationError`: rejected at setup time (board, players).
//! - `PersistenceError`: raised while saving or restoring a session.
//! - `InputError`: malformed console input, normally recovered by re-prompting.
//!
//! Turn resolution itself has no error path: once a board and its players
//! are validated, every roll in `[1, 6]` resolves.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::Square;

/// Invalid board or player setup.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("board size must be between 1 and {max}, got {size}")]
    InvalidBoardSize { size: i64, max: u32 },

    #[error("snake {start}->{end} must go down (end < start)")]
    SnakeNotDescending { start: Square, end: Square },

    #[error("ladder {start}->{end} must go up (start < end)")]
    LadderNotAscending { start: Square, end: Square },

    #[error("square {square} is outside the board (1..={last})")]
    SquareOutOfRange { square: Square, last: Square },

    #[error("square {square} is already the start of a {existing}")]
    ConflictingSquare { square: Square, existing: &'static str },

    #[error("a game needs between {min} and {max} players, got {count}")]
    InvalidPlayerCount { count: usize, min: usize, max: usize },

    #[error("player names must not be empty")]
    EmptyPlayerName,

    #[error("player name '{0}' is used more than once")]
    DuplicatePlayerName(String),

    #[error("player {name} has position {position} beyond the goal square {last}")]
    PositionOutOfRange {
        name: String,
        position: Square,
        last: Square,
    },

    #[error("both {0} and {1} are on the goal square")]
    MultipleWinners(String, String),
}

/// Failure to save or restore a session snapshot.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("no saved game at {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("unsupported snapshot version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("saved game setup is invalid: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),

    #[error("schema mismatch: {0}")]
    Schema(String),
}

/// A move sink could not record a turn. Never fatal to the game.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("could not write move to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Malformed console input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("'{0}' is not an integer")]
    NotAnInteger(String),

    #[error("value must be between {min} and {max}, got {value}")]
    OutOfRange { value: i64, min: i64, max: i64 },

    #[error("expected two numbers separated by a comma, got '{0}'")]
    MalformedPair(String),

    #[error("expected 'y' or 'n', got '{0}'")]
    NotYesNo(String),

    #[error("expected one of {expected}, got '{input}'")]
    UnknownChoice {
        input: String,
        expected: &'static str,
    },

    #[error("input must not be empty")]
    Empty,

    #[error("input closed")]
    Eof,
}

/// Any error surfaced by the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
