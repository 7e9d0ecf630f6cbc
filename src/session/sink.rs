//! Move sinks: where resolved turns are reported.
//!
//! A sink receives one `MoveEvent` per resolved turn. Recording is
//! fire-and-forget: the session logs a failed write and carries on.

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::core::MoveEvent;
use crate::error::SinkError;

/// Default file for the per-turn move log.
pub const DEFAULT_MOVES_FILE: &str = "game_moves.txt";

/// Receiver of resolved turns.
pub trait MoveSink {
    /// Record one resolved turn.
    fn record(&mut self, event: &MoveEvent) -> Result<(), SinkError>;
}

impl<S: MoveSink + ?Sized> MoveSink for Box<S> {
    fn record(&mut self, event: &MoveEvent) -> Result<(), SinkError> {
        (**self).record(event)
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl MoveSink for NullSink {
    fn record(&mut self, _event: &MoveEvent) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Emits each event as a structured `tracing` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl MoveSink for TracingSink {
    fn record(&mut self, event: &MoveEvent) -> Result<(), SinkError> {
        tracing::info!(
            player = %event.player,
            roll = event.roll.value(),
            position = event.position,
            "move"
        );
        Ok(())
    }
}

/// Appends one line per event to a text file.
///
/// The file is opened for each event so that a crash loses at most the
/// line being written.
#[derive(Clone, Debug)]
pub struct FileMoveSink {
    path: PathBuf,
}

impl FileMoveSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MoveSink for FileMoveSink {
    fn record(&mut self, event: &MoveEvent) -> Result<(), SinkError> {
        let write = || -> std::io::Result<()> {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            writeln!(file, "{event}")
        };

        write().map_err(|source| SinkError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Keeps events in a shared in-memory buffer.
///
/// Clones share the buffer, so a caller can hand one clone to a session and
/// read the events back through another.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    events: Rc<RefCell<Vec<MoveEvent>>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<MoveEvent> {
        self.events.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl MoveSink for MemorySink {
    fn record(&mut self, event: &MoveEvent) -> Result<(), SinkError> {
        self.events.borrow_mut().push(event.clone());
        Ok(())
    }
}
