//! Game sessions: turn orchestration across players.
//!
//! A `GameSession` owns the board and the players, draws rolls from an
//! injected `DiceSource`, hands each turn to the `TurnEngine`, appends to
//! the move log and reports every resolved turn to a `MoveSink`.
//!
//! ```
//! use snakes_ladders::core::{GameConfig, ScriptedDice};
//! use snakes_ladders::session::{GameSession, NullSink};
//!
//! let config = GameConfig::new(10)
//!     .with_ladder(9, 31)
//!     .with_player("Ada")
//!     .with_player("Bob");
//!
//! let mut session = GameSession::from_config(&config)
//!     .unwrap()
//!     .with_dice(ScriptedDice::from_values(&[4, 5, 5]).unwrap())
//!     .with_sink(NullSink);
//!
//! session.play_turn(); // Ada: 0 -> 4
//! session.play_turn(); // Bob: 0 -> 5
//! session.play_turn(); // Ada: 4 -> 9, ladder to 31
//!
//! assert_eq!(session.players()[0].position(), 31);
//! assert_eq!(session.move_log().len(), 3);
//! ```

mod game;
mod sink;

pub use game::GameSession;
pub use sink::{FileMoveSink, MemorySink, MoveSink, NullSink, TracingSink, DEFAULT_MOVES_FILE};
