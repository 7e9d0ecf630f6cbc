//! Snapshot encodings.
//!
//! - JSON: human-readable, compatible with legacy `game_state.json` saves
//! - Bincode: compact binary, chosen for `.bin` files

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::snapshot::SessionSnapshot;
use crate::error::PersistenceError;

/// On-disk encoding of a snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnapshotFormat {
    #[default]
    Json,
    Bincode,
}

impl SnapshotFormat {
    /// Pick the format from a file extension: `.bin` is bincode, anything
    /// else JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bin") => SnapshotFormat::Bincode,
            _ => SnapshotFormat::Json,
        }
    }

    /// Conventional file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            SnapshotFormat::Json => "json",
            SnapshotFormat::Bincode => "bin",
        }
    }

    pub fn encode(self, snapshot: &SessionSnapshot) -> Result<Vec<u8>, PersistenceError> {
        match self {
            SnapshotFormat::Json => serde_json::to_vec_pretty(snapshot)
                .map_err(|e| PersistenceError::Json(e.to_string())),
            SnapshotFormat::Bincode => {
                bincode::serialize(snapshot).map_err(|e| PersistenceError::Encoding(e.to_string()))
            }
        }
    }

    /// Decode and validate.
    ///
    /// Anything that decodes but would not restore to a valid session is
    /// rejected here, not later in the game.
    pub fn decode(self, bytes: &[u8]) -> Result<SessionSnapshot, PersistenceError> {
        let snapshot: SessionSnapshot = match self {
            SnapshotFormat::Json => {
                serde_json::from_slice(bytes).map_err(|e| PersistenceError::Json(e.to_string()))?
            }
            SnapshotFormat::Bincode => bincode::deserialize(bytes)
                .map_err(|e| PersistenceError::Encoding(e.to_string()))?,
        };

        snapshot.validate()?;
        Ok(snapshot)
    }
}
