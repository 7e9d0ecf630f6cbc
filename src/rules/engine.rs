//! Turn resolution.
//!
//! One call resolves one turn for one player:
//! 1. Add the roll to the position.
//! 2. Past the goal square: the move is forfeited, the player stays put.
//! 3. Otherwise move, then follow a snake or ladder starting there.
//! 4. Ending exactly on the goal square (after any teleport) wins.
//!
//! A snake or ladder may deliver the goal square; an overshoot never wins.

use serde::{Deserialize, Serialize};

use crate::core::board::{Board, Square, Teleport};
use crate::core::player::Player;
use crate::core::rng::DiceRoll;

/// Game progress after a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnStatus {
    /// No winner yet.
    InProgress,
    /// The player who moved is on the goal square. Terminal.
    Won,
}

impl TurnStatus {
    #[must_use]
    pub const fn is_won(self) -> bool {
        matches!(self, TurnStatus::Won)
    }
}

/// Everything that happened during one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub roll: DiceRoll,

    /// Position before the roll.
    pub from: Square,

    /// Square reached by the roll, before any teleport. `None` on overshoot.
    pub landed: Option<Square>,

    /// Snake or ladder followed from `landed`.
    pub teleport: Option<Teleport>,

    /// Position after the turn.
    pub position: Square,

    pub status: TurnStatus,
}

impl TurnOutcome {
    /// Did the roll overshoot the goal square?
    #[must_use]
    pub const fn overshot(&self) -> bool {
        self.landed.is_none()
    }

    /// Did the player end on a different square than they started?
    #[must_use]
    pub const fn moved(&self) -> bool {
        self.position != self.from
    }
}

/// Stateless turn resolver.
#[derive(Clone, Copy, Debug, Default)]
pub struct TurnEngine;

impl TurnEngine {
    /// Apply `roll` to `player` on `board`.
    ///
    /// A player already on the goal square is left untouched and reported
    /// as `Won` again; sessions stop calling the engine once a winner exists.
    pub fn resolve_turn(board: &Board, player: &mut Player, roll: DiceRoll) -> TurnOutcome {
        let from = player.position();
        let goal = board.last_square();

        if from == goal {
            return TurnOutcome {
                roll,
                from,
                landed: None,
                teleport: None,
                position: from,
                status: TurnStatus::Won,
            };
        }

        let tentative = from + Square::from(roll.value());
        if tentative > goal {
            return TurnOutcome {
                roll,
                from,
                landed: None,
                teleport: None,
                position: from,
                status: TurnStatus::InProgress,
            };
        }

        let teleport = board.teleport(tentative);
        let position = teleport.map_or(tentative, |t| t.to);
        player.set_position(position);

        let status = if position == goal {
            TurnStatus::Won
        } else {
            TurnStatus::InProgress
        };

        TurnOutcome {
            roll,
            from,
            landed: Some(tentative),
            teleport,
            position,
            status,
        }
    }
}
