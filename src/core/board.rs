//! Board geometry and teleports.
//!
//! A board of size `n` has squares `1..=n*n`; square `n*n` is the goal.
//! Snakes map a head down to a tail, ladders map a foot up to a top.
//!
//! Both mappings are persistent `im::OrdMap`s: cloning a board for a
//! snapshot is O(1) and iteration order is deterministic.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// A board square. `0` is the off-board starting position.
pub type Square = u32;

/// Largest accepted board side, keeping `size * size` well inside `u32`.
pub const MAX_BOARD_SIZE: u32 = 1000;

/// Kind of teleport triggered by landing on a square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeleportKind {
    Snake,
    Ladder,
}

impl TeleportKind {
    /// Lower-case name for messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TeleportKind::Snake => "snake",
            TeleportKind::Ladder => "ladder",
        }
    }
}

impl std::fmt::Display for TeleportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A snake or ladder jump taken during a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Teleport {
    pub kind: TeleportKind,
    pub from: Square,
    pub to: Square,
}

/// Static board configuration.
///
/// ## Example
///
/// ```
/// use snakes_ladders::core::Board;
///
/// let board = Board::new(10)
///     .unwrap()
///     .with_snake(99, 10)
///     .unwrap()
///     .with_ladder(9, 31)
///     .unwrap();
///
/// assert_eq!(board.last_square(), 100);
/// assert_eq!(board.teleport(9).map(|t| t.to), Some(31));
/// assert!(board.teleport(50).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: u32,
    snakes: OrdMap<Square, Square>,
    ladders: OrdMap<Square, Square>,
}

impl Board {
    /// Create an empty board with `size * size` squares.
    pub fn new(size: u32) -> Result<Self, ConfigurationError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(ConfigurationError::InvalidBoardSize {
                size: i64::from(size),
                max: MAX_BOARD_SIZE,
            });
        }

        Ok(Self {
            size,
            snakes: OrdMap::new(),
            ladders: OrdMap::new(),
        })
    }

    /// Create a board from a signed size, as typed by a user or read from a
    /// save file.
    pub fn with_size(size: i64) -> Result<Self, ConfigurationError> {
        let size = u32::try_from(size).map_err(|_| ConfigurationError::InvalidBoardSize {
            size,
            max: MAX_BOARD_SIZE,
        })?;
        Self::new(size)
    }

    /// Board side length.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// The goal square, `size * size`.
    #[must_use]
    pub const fn last_square(&self) -> Square {
        self.size * self.size
    }

    /// Snake heads mapped to their tails.
    #[must_use]
    pub fn snakes(&self) -> &OrdMap<Square, Square> {
        &self.snakes
    }

    /// Ladder feet mapped to their tops.
    #[must_use]
    pub fn ladders(&self) -> &OrdMap<Square, Square> {
        &self.ladders
    }

    /// Add a snake from `start` down to `end`.
    ///
    /// Re-adding a snake at the same head replaces the old tail.
    pub fn add_snake(&mut self, start: Square, end: Square) -> Result<(), ConfigurationError> {
        self.check_square(start)?;
        self.check_square(end)?;
        if end >= start {
            return Err(ConfigurationError::SnakeNotDescending { start, end });
        }
        if self.ladders.contains_key(&start) {
            return Err(ConfigurationError::ConflictingSquare {
                square: start,
                existing: TeleportKind::Ladder.name(),
            });
        }

        self.snakes.insert(start, end);
        Ok(())
    }

    /// Add a ladder from `start` up to `end`.
    ///
    /// Re-adding a ladder at the same foot replaces the old top.
    pub fn add_ladder(&mut self, start: Square, end: Square) -> Result<(), ConfigurationError> {
        self.check_square(start)?;
        self.check_square(end)?;
        if start >= end {
            return Err(ConfigurationError::LadderNotAscending { start, end });
        }
        if self.snakes.contains_key(&start) {
            return Err(ConfigurationError::ConflictingSquare {
                square: start,
                existing: TeleportKind::Snake.name(),
            });
        }

        self.ladders.insert(start, end);
        Ok(())
    }

    /// Builder form of [`Board::add_snake`].
    pub fn with_snake(mut self, start: Square, end: Square) -> Result<Self, ConfigurationError> {
        self.add_snake(start, end)?;
        Ok(self)
    }

    /// Builder form of [`Board::add_ladder`].
    pub fn with_ladder(mut self, start: Square, end: Square) -> Result<Self, ConfigurationError> {
        self.add_ladder(start, end)?;
        Ok(self)
    }

    /// Is `square` a real square of this board (not the off-board start)?
    #[must_use]
    pub fn contains(&self, square: Square) -> bool {
        (1..=self.last_square()).contains(&square)
    }

    /// The teleport starting at `square`, if any.
    #[must_use]
    pub fn teleport(&self, square: Square) -> Option<Teleport> {
        if let Some(&to) = self.snakes.get(&square) {
            return Some(Teleport {
                kind: TeleportKind::Snake,
                from: square,
                to,
            });
        }
        self.ladders.get(&square).map(|&to| Teleport {
            kind: TeleportKind::Ladder,
            from: square,
            to,
        })
    }

    fn check_square(&self, square: Square) -> Result<(), ConfigurationError> {
        if self.contains(square) {
            Ok(())
        } else {
            Err(ConfigurationError::SquareOutOfRange {
                square,
                last: self.last_square(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_size() {
        let board = Board::new(10).unwrap();
        assert_eq!(board.size(), 10);
        assert_eq!(board.last_square(), 100);
        assert!(board.snakes().is_empty());
        assert!(board.ladders().is_empty());
    }

    #[test]
    fn test_board_rejects_zero_and_negative_size() {
        assert!(matches!(
            Board::new(0),
            Err(ConfigurationError::InvalidBoardSize { size: 0, .. })
        ));
        assert!(matches!(
            Board::with_size(-3),
            Err(ConfigurationError::InvalidBoardSize { size: -3, .. })
        ));
        assert!(Board::new(MAX_BOARD_SIZE + 1).is_err());
        assert!(Board::new(1).is_ok());
    }

    #[test]
    fn test_snake_must_descend() {
        let mut board = Board::new(10).unwrap();
        assert_eq!(
            board.add_snake(10, 20),
            Err(ConfigurationError::SnakeNotDescending { start: 10, end: 20 })
        );
        assert!(board.add_snake(10, 10).is_err());
        assert!(board.add_snake(20, 10).is_ok());
        assert_eq!(board.snakes().get(&20), Some(&10));
    }

    #[test]
    fn test_ladder_must_ascend() {
        let mut board = Board::new(10).unwrap();
        assert_eq!(
            board.add_ladder(31, 9),
            Err(ConfigurationError::LadderNotAscending { start: 31, end: 9 })
        );
        assert!(board.add_ladder(9, 31).is_ok());
    }

    #[test]
    fn test_endpoints_must_be_on_board() {
        let mut board = Board::new(5).unwrap();
        assert_eq!(
            board.add_snake(26, 3),
            Err(ConfigurationError::SquareOutOfRange { square: 26, last: 25 })
        );
        assert!(board.add_snake(4, 0).is_err());
        assert!(board.add_ladder(0, 4).is_err());
        assert!(board.add_ladder(3, 26).is_err());
        assert!(board.add_ladder(24, 25).is_ok());
    }

    #[test]
    fn test_snake_and_ladder_cannot_share_start() {
        let mut board = Board::new(10).unwrap().with_ladder(9, 31).unwrap();
        assert_eq!(
            board.add_snake(9, 2),
            Err(ConfigurationError::ConflictingSquare {
                square: 9,
                existing: "ladder",
            })
        );

        let mut board = Board::new(10).unwrap().with_snake(40, 2).unwrap();
        assert!(board.add_ladder(40, 60).is_err());
    }

    #[test]
    fn test_duplicate_start_last_write_wins() {
        let board = Board::new(10)
            .unwrap()
            .with_snake(50, 10)
            .unwrap()
            .with_snake(50, 20)
            .unwrap();
        assert_eq!(board.snakes().len(), 1);
        assert_eq!(board.snakes().get(&50), Some(&20));
    }

    #[test]
    fn test_teleport_lookup() {
        let board = Board::new(10)
            .unwrap()
            .with_snake(99, 10)
            .unwrap()
            .with_ladder(9, 31)
            .unwrap();

        assert_eq!(
            board.teleport(99),
            Some(Teleport {
                kind: TeleportKind::Snake,
                from: 99,
                to: 10
            })
        );
        assert_eq!(board.teleport(9).map(|t| t.kind), Some(TeleportKind::Ladder));
        assert_eq!(board.teleport(31), None);
    }
}
