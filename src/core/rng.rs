//! Dice: validated rolls and injectable random sources.
//!
//! ## Key Features
//!
//! - **Injectable**: sessions roll through the `DiceSource` trait
//! - **Deterministic**: `GameRng` with the same seed produces the same rolls
//! - **Scriptable**: `ScriptedDice` replays a fixed sequence of rolls
//!
//! ```
//! use snakes_ladders::core::{DiceSource, GameRng};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! for _ in 0..10 {
//!     assert_eq!(a.roll(), b.roll());
//! }
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Number of faces on the die.
pub const DIE_FACES: u8 = 6;

/// A single die roll in `[1, 6]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DiceRoll(u8);

impl DiceRoll {
    /// Create a roll, or `None` if `value` is not a die face.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= DIE_FACES {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the number of pips.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Iterate over every face, 1 through 6.
    pub fn all() -> impl Iterator<Item = DiceRoll> {
        (1..=DIE_FACES).map(DiceRoll)
    }
}

impl TryFrom<u8> for DiceRoll {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("{value} is not a die face (1-{DIE_FACES})"))
    }
}

impl From<DiceRoll> for u8 {
    fn from(roll: DiceRoll) -> Self {
        roll.0
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of die rolls for a session.
///
/// Sessions never reach for a global random generator; tests inject a
/// seeded `GameRng` or a `ScriptedDice`.
pub trait DiceSource {
    /// Draw the next roll.
    fn roll(&mut self) -> DiceRoll;
}

/// Deterministic RNG for dice.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG with a seed drawn from the operating system.
    ///
    /// The seed is kept so a game can be replayed with `--seed`.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: std::ops::RangeInclusive<u8>) -> u8 {
        self.inner.gen_range(range)
    }
}

impl DiceSource for GameRng {
    fn roll(&mut self) -> DiceRoll {
        DiceRoll(self.gen_range(1..=DIE_FACES))
    }
}

/// Replays a fixed sequence of rolls, wrapping around at the end.
///
/// The sequence `1, 2, 2` produces `1, 2, 2, 1, 2, 2, 1, ...`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedDice {
    rolls: Vec<DiceRoll>,
    next: usize,
}

impl ScriptedDice {
    /// Create a script. Returns `None` for an empty sequence.
    #[must_use]
    pub fn new(rolls: Vec<DiceRoll>) -> Option<Self> {
        if rolls.is_empty() {
            None
        } else {
            Some(Self { rolls, next: 0 })
        }
    }

    /// Create a script from raw values, rejecting anything that is not a die face.
    pub fn from_values(values: &[u8]) -> Result<Self, String> {
        let rolls = values
            .iter()
            .map(|&v| DiceRoll::try_from(v))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rolls).ok_or_else(|| "dice script must not be empty".to_string())
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self) -> DiceRoll {
        let roll = self.rolls[self.next % self.rolls.len()];
        self.next = (self.next + 1) % self.rolls.len();
        roll
    }
}

impl<D: DiceSource + ?Sized> DiceSource for Box<D> {
    fn roll(&mut self) -> DiceRoll {
        (**self).roll()
    }
}
