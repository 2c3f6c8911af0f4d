//! File-backed storage backend.

use super::{KeyValueStore, StorageError};
use std::fs;
use std::io;
use std::path::PathBuf;

const APP_DIR: &str = "wireflow";

/// One file per key under a storage directory.
///
/// Values are written verbatim, so a stored JSON blob stays inspectable and
/// editable on disk. Keys map directly to file names; callers use plain
/// identifier-style keys like `node-rotations`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at the platform config directory
    /// (e.g. `~/.config/wireflow` on Linux).
    pub fn new() -> Result<Self, StorageError> {
        let base = dirs::config_dir().ok_or(StorageError::NoStorageDir)?;
        Ok(Self::with_dir(base.join(APP_DIR)))
    }

    /// Store rooted at an explicit directory. The directory is created on
    /// first write.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
