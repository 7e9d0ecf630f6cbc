//! Move history.
//!
//! ## MoveRecord
//!
//! One entry of the move log: who moved and where they ended up.
//!
//! ## MoveEvent
//!
//! What a move sink receives once per resolved turn: the record plus the
//! roll that produced it.
//!
//! ## MoveLog
//!
//! Append-only history backed by `im::Vector`, so snapshotting a long game
//! does not copy the whole log.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::board::Square;
use super::rng::DiceRoll;

/// One resolved turn as kept in the move log.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Name of the player who moved.
    pub player: String,

    /// Position after the turn, including any snake or ladder.
    pub position: Square,
}

impl MoveRecord {
    /// Create a new move record.
    #[must_use]
    pub fn new(player: impl Into<String>, position: Square) -> Self {
        Self {
            player: player.into(),
            position,
        }
    }
}

/// A resolved turn as reported to a move sink.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveEvent {
    pub player: String,
    pub roll: DiceRoll,
    pub position: Square,
}

impl std::fmt::Display for MoveEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Player {} rolled a {} and moved to position {}",
            self.player, self.roll, self.position
        )
    }
}

/// Append-only ordered history of resolved turns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLog {
    records: Vector<MoveRecord>,
}

impl MoveLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved turn.
    pub fn push(&mut self, record: MoveRecord) {
        self.records.push_back(record);
    }

    /// Number of recorded turns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent record.
    #[must_use]
    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    /// Iterate in the order turns were played.
    pub fn iter(&self) -> impl Iterator<Item = &MoveRecord> {
        self.records.iter()
    }

    /// Positions reached by one player, in order.
    pub fn positions_of<'a>(&'a self, player: &'a str) -> impl Iterator<Item = Square> + 'a {
        self.records
            .iter()
            .filter(move |r| r.player == player)
            .map(|r| r.position)
    }
}

impl FromIterator<MoveRecord> for MoveLog {
    fn from_iter<I: IntoIterator<Item = MoveRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
