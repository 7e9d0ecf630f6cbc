//! Game setup configuration.
//!
//! A `GameConfig` collects everything needed to start a session:
//! - board size
//! - snakes and ladders
//! - player names, in turn order
//!
//! Nothing is checked while the builder is filled in; `build` validates the
//! whole setup at once and fails with the first `ConfigurationError`.

use super::board::{Board, Square};
use super::player::{validate_roster, Player};
use crate::error::ConfigurationError;

/// Complete game setup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameConfig {
    /// Board side length.
    pub board_size: i64,

    /// Snakes as (head, tail), applied in order.
    pub snakes: Vec<(Square, Square)>,

    /// Ladders as (foot, top), applied in order.
    pub ladders: Vec<(Square, Square)>,

    /// Player names in turn order.
    pub players: Vec<String>,
}

impl GameConfig {
    /// Create a configuration for a `board_size x board_size` board.
    pub fn new(board_size: i64) -> Self {
        Self {
            board_size,
            ..Self::default()
        }
    }

    /// Add a snake.
    #[must_use]
    pub fn with_snake(mut self, start: Square, end: Square) -> Self {
        self.snakes.push((start, end));
        self
    }

    /// Add a ladder.
    #[must_use]
    pub fn with_ladder(mut self, start: Square, end: Square) -> Self {
        self.ladders.push((start, end));
        self
    }

    /// Add a player at the end of the turn order.
    #[must_use]
    pub fn with_player(mut self, name: impl Into<String>) -> Self {
        self.players.push(name.into());
        self
    }

    /// Build the board described by this configuration.
    pub fn build_board(&self) -> Result<Board, ConfigurationError> {
        let mut board = Board::with_size(self.board_size)?;
        for &(start, end) in &self.snakes {
            board.add_snake(start, end)?;
        }
        for &(start, end) in &self.ladders {
            board.add_ladder(start, end)?;
        }
        Ok(board)
    }

    /// Build the roster, all players off the board.
    pub fn build_players(&self) -> Result<Vec<Player>, ConfigurationError> {
        let players = self
            .players
            .iter()
            .map(Player::new)
            .collect::<Result<Vec<_>, _>>()?;
        validate_roster(&players)?;
        Ok(players)
    }

    /// Validate and build both board and players.
    pub fn build(&self) -> Result<(Board, Vec<Player>), ConfigurationError> {
        Ok((self.build_board()?, self.build_players()?))
    }
}
