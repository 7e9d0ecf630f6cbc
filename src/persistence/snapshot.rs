//! Versioned session snapshot.
//!
//! The JSON layout is the legacy `game_state.json` layout:
//!
//! ```text
//! {
//!   "version": 1,
//!   "board_size": 10,
//!   "snakes": {"16": 6, "99": 10},
//!   "ladders": {"9": 31},
//!   "players": {"Ada": 31, "Bob": 5},
//!   "current_player": 1,
//!   "move_log": [["Ada", 4], ["Bob", 5], ["Ada", 31]]
//! }
//! ```
//!
//! `players` is an object whose key order is the turn order. `version` may
//! be absent, in which case it is 1.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{Board, MoveLog, MoveRecord, Player, Square};
use crate::error::PersistenceError;
use crate::session::GameSession;

/// Snapshot schema version written by this crate.
pub const SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// Everything needed to resume a session. The dice source is not included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,

    pub board_size: i64,

    pub snakes: BTreeMap<Square, Square>,

    pub ladders: BTreeMap<Square, Square>,

    /// (name, position) in turn order.
    #[serde(with = "ordered_players")]
    pub players: Vec<(String, Square)>,

    pub current_player: usize,

    /// (name, position) per resolved turn.
    pub move_log: Vec<(String, Square)>,
}

impl SessionSnapshot {
    /// Capture the state of a session.
    #[must_use]
    pub fn capture(session: &GameSession) -> Self {
        let board = session.board();
        Self {
            version: SNAPSHOT_VERSION,
            board_size: i64::from(board.size()),
            snakes: board.snakes().iter().map(|(&s, &e)| (s, e)).collect(),
            ladders: board.ladders().iter().map(|(&s, &e)| (s, e)).collect(),
            players: session
                .players()
                .iter()
                .map(|p| (p.name().to_string(), p.position()))
                .collect(),
            current_player: session.current_player_index(),
            move_log: session
                .move_log()
                .iter()
                .map(|r| (r.player.clone(), r.position))
                .collect(),
        }
    }

    /// Check the snapshot against every session invariant.
    pub fn validate(&self) -> Result<(), PersistenceError> {
        self.restore().map(|_| ())
    }

    /// Restore a session. Dice and sink are the session defaults.
    pub fn restore(&self) -> Result<GameSession, PersistenceError> {
        let (board, players, current, move_log) = self.to_parts()?;
        Ok(GameSession::assemble(board, players, current, move_log)?)
    }

    fn to_parts(&self) -> Result<(Board, Vec<Player>, usize, MoveLog), PersistenceError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let mut board = Board::with_size(self.board_size)?;
        for (&start, &end) in &self.snakes {
            board.add_snake(start, end)?;
        }
        for (&start, &end) in &self.ladders {
            board.add_ladder(start, end)?;
        }

        let players = self
            .players
            .iter()
            .map(|(name, position)| Player::at(name.as_str(), *position))
            .collect::<Result<Vec<_>, _>>()?;
        crate::core::validate_roster(&players)?;

        if self.current_player >= players.len() {
            return Err(PersistenceError::Schema(format!(
                "current_player {} but only {} players",
                self.current_player,
                players.len()
            )));
        }

        let goal = board.last_square();
        let mut move_log = MoveLog::new();
        for (turn, (name, position)) in self.move_log.iter().enumerate() {
            if !players.iter().any(|p| p.name() == name.trim()) {
                return Err(PersistenceError::Schema(format!(
                    "move {turn} names unknown player '{name}'"
                )));
            }
            if *position > goal {
                return Err(PersistenceError::Schema(format!(
                    "move {turn} reaches {position}, beyond the goal square {goal}"
                )));
            }
            move_log.push(MoveRecord::new(name.trim(), *position));
        }

        Ok((board, players, self.current_player, move_log))
    }
}

impl GameSession {
    /// Capture the full session state (`saveState`).
    #[must_use]
    pub fn save_state(&self) -> SessionSnapshot {
        SessionSnapshot::capture(self)
    }

    /// Rebuild a session from a snapshot (`loadState`).
    ///
    /// The snapshot is validated first; a failure leaves nothing behind.
    pub fn load_state(snapshot: &SessionSnapshot) -> Result<Self, PersistenceError> {
        snapshot.restore()
    }
}

/// Serializes `Vec<(String, Square)>` as a map, keeping entry order.
mod ordered_players {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use crate::core::{Square, MAX_PLAYERS};

    pub fn serialize<S>(players: &[(String, Square)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(players.len()))?;
        for (name, position) in players {
            map.serialize_entry(name, position)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, Square)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PlayersVisitor;

        impl<'de> Visitor<'de> for PlayersVisitor {
            type Value = Vec<(String, Square)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of player name to position")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut players = Vec::with_capacity(access.size_hint().unwrap_or(0).min(MAX_PLAYERS));
                while let Some(entry) = access.next_entry::<String, Square>()? {
                    players.push(entry);
                }
                Ok(players)
            }
        }

        deserializer.deserialize_map(PlayersVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, ScriptedDice};
    use crate::error::ConfigurationError;
    use crate::session::NullSink;

    fn sample_session() -> GameSession {
        let config = GameConfig::new(10)
            .with_snake(16, 6)
            .with_ladder(9, 31)
            .with_player("Zed")
            .with_player("Ada");

        let mut session = GameSession::from_config(&config)
            .unwrap()
            .with_dice(ScriptedDice::from_values(&[4, 5, 5]).unwrap())
            .with_sink(NullSink);
        session.play_to_end(3);
        session
    }

    #[test]
    fn test_capture() {
        let snapshot = sample_session().save_state();

        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.board_size, 10);
        assert_eq!(snapshot.snakes.get(&16), Some(&6));
        assert_eq!(
            snapshot.players,
            vec![("Zed".to_string(), 31), ("Ada".to_string(), 5)]
        );
        assert_eq!(snapshot.current_player, 1);
        assert_eq!(snapshot.move_log.len(), 3);
    }

    #[test]
    fn test_json_keeps_player_order() {
        let snapshot = sample_session().save_state();
        let json = serde_json::to_string(&snapshot).unwrap();

        assert!(json.find("\"Zed\"").unwrap() < json.find("\"Ada\"").unwrap());
        assert!(json.contains("\"snakes\":{\"16\":6}"));

        let decoded: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_restore_round_trip() {
        let session = sample_session();
        let restored = GameSession::load_state(&session.save_state()).unwrap();

        assert_eq!(restored.board(), session.board());
        assert_eq!(restored.players(), session.players());
        assert_eq!(restored.current_player_index(), session.current_player_index());
        assert_eq!(restored.move_log(), session.move_log());
        assert_eq!(restored.winner_id(), session.winner_id());
    }

    #[test]
    fn test_missing_version_defaults() {
        let json = r#"{
            "board_size": 3,
            "snakes": {"8": 2},
            "ladders": {},
            "players": {"Ada": 1, "Bob": 0},
            "current_player": 1,
            "move_log": [["Ada", 1]]
        }"#;

        let snapshot: SessionSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.version, 1);
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_future_version() {
        let mut snapshot = sample_session().save_state();
        snapshot.version = 2;
        assert!(matches!(
            snapshot.validate(),
            Err(PersistenceError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_board() {
        let mut snapshot = sample_session().save_state();
        snapshot.snakes.insert(20, 40);
        assert!(matches!(
            snapshot.validate(),
            Err(PersistenceError::InvalidConfiguration(
                ConfigurationError::SnakeNotDescending { .. }
            ))
        ));

        let mut snapshot = sample_session().save_state();
        snapshot.board_size = -1;
        assert!(matches!(
            snapshot.validate(),
            Err(PersistenceError::InvalidConfiguration(
                ConfigurationError::InvalidBoardSize { .. }
            ))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_index_and_log() {
        let mut snapshot = sample_session().save_state();
        snapshot.current_player = 2;
        assert!(matches!(snapshot.validate(), Err(PersistenceError::Schema(_))));

        let mut snapshot = sample_session().save_state();
        snapshot.move_log.push(("Eve".to_string(), 3));
        assert!(matches!(snapshot.validate(), Err(PersistenceError::Schema(_))));

        let mut snapshot = sample_session().save_state();
        snapshot.move_log.push(("Ada".to_string(), 101));
        assert!(matches!(snapshot.validate(), Err(PersistenceError::Schema(_))));
    }

    #[test]
    fn test_validate_rejects_bad_players() {
        let mut snapshot = sample_session().save_state();
        snapshot.players.truncate(1);
        snapshot.current_player = 0;
        assert!(matches!(
            snapshot.validate(),
            Err(PersistenceError::InvalidConfiguration(
                ConfigurationError::InvalidPlayerCount { count: 1, .. }
            ))
        ));

        let mut snapshot = sample_session().save_state();
        snapshot.players[1].1 = 500;
        assert!(matches!(
            snapshot.validate(),
            Err(PersistenceError::InvalidConfiguration(
                ConfigurationError::PositionOutOfRange { position: 500, .. }
            ))
        ));
    }
}
