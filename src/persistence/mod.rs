//! Saving and resuming sessions.
//!
//! - `SessionSnapshot`: versioned schema, validated on load
//! - `SnapshotFormat`: JSON or bincode
//! - `SnapshotRepository`: file and in-memory storage
//! - `write_history`: end-of-game text dump of the move log

mod format;
mod history;
mod repository;
mod snapshot;

pub use format::SnapshotFormat;
pub use history::{format_history, write_history, DEFAULT_HISTORY_FILE};
pub use repository::{
    FileSnapshotRepository, MemorySnapshotRepository, SnapshotRepository, DEFAULT_SAVE_FILE,
};
pub use snapshot::{SessionSnapshot, SNAPSHOT_VERSION};
