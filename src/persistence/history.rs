//! Plain-text dump of the move log.

use std::fs;
use std::path::Path;

use crate::core::MoveLog;
use crate::error::PersistenceError;

/// Default file for the end-of-game history dump.
pub const DEFAULT_HISTORY_FILE: &str = "game_history.txt";

/// One line per move: `Player {name} moved to position {position}`.
#[must_use]
pub fn format_history(log: &MoveLog) -> String {
    log.iter()
        .map(|r| format!("Player {} moved to position {}\n", r.player, r.position))
        .collect()
}

/// Write the move log to `path`, replacing any previous contents.
pub fn write_history(path: impl AsRef<Path>, log: &MoveLog) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    fs::write(path, format_history(log))?;
    tracing::debug!("Wrote {} moves to {}", log.len(), path.display());
    Ok(())
}
