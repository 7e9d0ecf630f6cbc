//! Player identification and per-player state.
//!
//! ## PlayerId
//!
//! 0-based index into the session's turn order.
//!
//! ## Player
//!
//! A named token on the board. Only the turn engine moves it.

use serde::{Deserialize, Serialize};

use super::board::Square;
use crate::error::ConfigurationError;

/// Fewest players a session accepts.
pub const MIN_PLAYERS: usize = 2;

/// Most players a session accepts.
pub const MAX_PLAYERS: usize = 4;

/// Player identifier: position in turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use snakes_ladders::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(0));
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A player's name and board position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Player {
    name: String,
    position: Square,
}

impl Player {
    /// Create a player off the board (position 0).
    ///
    /// The name is trimmed and must not be empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigurationError> {
        Self::at(name, 0)
    }

    /// Create a player at a given position, e.g. when restoring a save.
    pub fn at(name: impl Into<String>, position: Square) -> Result<Self, ConfigurationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ConfigurationError::EmptyPlayerName);
        }
        Ok(Self { name, position })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn position(&self) -> Square {
        self.position
    }

    /// Has the player entered the board yet?
    #[must_use]
    pub const fn has_started(&self) -> bool {
        self.position > 0
    }

    pub(crate) fn set_position(&mut self, position: Square) {
        self.position = position;
    }
}

/// Check a roster: player count within bounds, names unique.
///
/// Names are compared after trimming, which [`Player::new`] already does.
pub fn validate_roster(players: &[Player]) -> Result<(), ConfigurationError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
        return Err(ConfigurationError::InvalidPlayerCount {
            count: players.len(),
            min: MIN_PLAYERS,
            max: MAX_PLAYERS,
        });
    }

    for (i, player) in players.iter().enumerate() {
        if players[..i].iter().any(|p| p.name == player.name) {
            return Err(ConfigurationError::DuplicatePlayerName(player.name.clone()));
        }
    }

    Ok(())
}
