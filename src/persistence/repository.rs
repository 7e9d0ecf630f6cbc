//! Snapshot storage.
//!
//! A `SnapshotRepository` holds one saved session. The file repository
//! writes through a temporary file and an atomic rename so a crash during
//! save never leaves a half-written save behind.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use super::format::SnapshotFormat;
use super::snapshot::SessionSnapshot;
use crate::error::PersistenceError;
use crate::session::GameSession;

/// Default save file name.
pub const DEFAULT_SAVE_FILE: &str = "game_state.json";

/// Storage for a single session snapshot.
pub trait SnapshotRepository {
    /// Store a snapshot, replacing any previous one.
    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), PersistenceError>;

    /// Load and validate the stored snapshot.
    fn load(&self) -> Result<SessionSnapshot, PersistenceError>;

    /// Is there a stored snapshot?
    fn exists(&self) -> bool;

    /// Remove the stored snapshot, if any.
    fn delete(&self) -> Result<(), PersistenceError>;
}

/// File-based snapshot storage.
#[derive(Clone, Debug)]
pub struct FileSnapshotRepository {
    path: PathBuf,
    format: SnapshotFormat,
}

impl FileSnapshotRepository {
    /// Store at `path`, format chosen from its extension.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = SnapshotFormat::from_path(&path);
        Self { path, format }
    }

    /// Store at `path` in an explicit format.
    pub fn with_format(path: impl AsRef<Path>, format: SnapshotFormat) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn format(&self) -> SnapshotFormat {
        self.format
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), PersistenceError> {
        let bytes = self.format.encode(snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Saved session to {}", self.path.display());

        Ok(())
    }

    fn load(&self) -> Result<SessionSnapshot, PersistenceError> {
        if !self.path.exists() {
            return Err(PersistenceError::NotFound(self.path.clone()));
        }

        let bytes = fs::read(&self.path)?;
        let snapshot = self.format.decode(&bytes).inspect_err(|e| {
            tracing::warn!("Rejected save file {}: {}", self.path.display(), e);
        })?;

        tracing::info!(
            "Loaded session from {} ({} players, {} moves)",
            self.path.display(),
            snapshot.players.len(),
            snapshot.move_log.len()
        );

        Ok(snapshot)
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn delete(&self) -> Result<(), PersistenceError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            tracing::debug!("Deleted save {}", self.path.display());
        }
        Ok(())
    }
}

/// In-memory snapshot storage holding encoded bytes.
///
/// Goes through the same encode/decode path as the file repository.
#[derive(Debug, Default)]
pub struct MemorySnapshotRepository {
    format: SnapshotFormat,
    bytes: RefCell<Option<Vec<u8>>>,
}

impl MemorySnapshotRepository {
    #[must_use]
    pub fn new(format: SnapshotFormat) -> Self {
        Self {
            format,
            bytes: RefCell::new(None),
        }
    }

    /// Replace the stored bytes directly, e.g. to simulate a damaged save.
    pub fn put_raw(&self, bytes: Vec<u8>) {
        *self.bytes.borrow_mut() = Some(bytes);
    }

    /// Copy of the stored bytes.
    #[must_use]
    pub fn raw(&self) -> Option<Vec<u8>> {
        self.bytes.borrow().clone()
    }
}

impl SnapshotRepository for MemorySnapshotRepository {
    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), PersistenceError> {
        let bytes = self.format.encode(snapshot)?;
        *self.bytes.borrow_mut() = Some(bytes);
        Ok(())
    }

    fn load(&self) -> Result<SessionSnapshot, PersistenceError> {
        let bytes = self.bytes.borrow();
        let bytes = bytes
            .as_deref()
            .ok_or_else(|| PersistenceError::NotFound(PathBuf::from("<memory>")))?;
        self.format.decode(bytes)
    }

    fn exists(&self) -> bool {
        self.bytes.borrow().is_some()
    }

    fn delete(&self) -> Result<(), PersistenceError> {
        *self.bytes.borrow_mut() = None;
        Ok(())
    }
}

impl GameSession {
    /// Save this session to a repository.
    pub fn save_to(&self, repo: &dyn SnapshotRepository) -> Result<(), PersistenceError> {
        repo.save(&self.save_state())?;
        tracing::info!(
            "Session saved after {} moves",
            self.move_log().len()
        );
        Ok(())
    }

    /// Resume a session from a repository.
    ///
    /// Dice and sink are session defaults; replace them with
    /// [`GameSession::with_dice`] and [`GameSession::with_sink`].
    pub fn load_from(repo: &dyn SnapshotRepository) -> Result<Self, PersistenceError> {
        let snapshot = repo.load()?;
        Self::load_state(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, ScriptedDice};
    use crate::session::NullSink;

    fn session() -> GameSession {
        let config = GameConfig::new(6)
            .with_ladder(3, 20)
            .with_snake(30, 7)
            .with_player("Ada")
            .with_player("Bob")
            .with_player("Cy");
        let mut session = GameSession::from_config(&config)
            .unwrap()
            .with_dice(ScriptedDice::from_values(&[3, 6, 2, 5]).unwrap())
            .with_sink(NullSink);
        session.play_to_end(7);
        session
    }

    #[test]
    fn test_file_repository_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path().join("save.json"));
        let original = session();

        assert!(!repo.exists());
        original.save_to(&repo).unwrap();
        assert!(repo.exists());
        assert!(!repo.temp_path().exists());

        let restored = GameSession::load_from(&repo).unwrap();
        assert_eq!(restored.save_state(), original.save_state());
    }

    #[test]
    fn test_file_repository_bincode() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path().join("nested").join("save.bin"));
        assert_eq!(repo.format(), SnapshotFormat::Bincode);

        let original = session();
        original.save_to(&repo).unwrap();

        let restored = GameSession::load_from(&repo).unwrap();
        assert_eq!(restored.save_state(), original.save_state());
    }

    #[test]
    fn test_file_repository_missing() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path().join("nope.json"));

        assert!(matches!(repo.load(), Err(PersistenceError::NotFound(_))));
        assert!(repo.delete().is_ok());
    }

    #[test]
    fn test_file_repository_delete() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path().join("save.json"));
        session().save_to(&repo).unwrap();

        repo.delete().unwrap();
        assert!(!repo.exists());
    }

    #[test]
    fn test_memory_repository() {
        let repo = MemorySnapshotRepository::new(SnapshotFormat::Json);
        assert!(matches!(repo.load(), Err(PersistenceError::NotFound(_))));

        let original = session();
        original.save_to(&repo).unwrap();
        assert!(repo.exists());
        assert_eq!(repo.load().unwrap(), original.save_state());

        repo.put_raw(b"[]".to_vec());
        assert!(matches!(repo.load(), Err(PersistenceError::Json(_))));

        repo.delete().unwrap();
        assert!(!repo.exists());
    }
}
