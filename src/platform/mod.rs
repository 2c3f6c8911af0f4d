//! Key-value storage backends.
//!
//! Persistence in the editor is local-storage shaped: string values under
//! string keys, written whole. [`KeyValueStore`] is the seam between the
//! domain actors and whatever backs that storage in a given deployment -
//! in-memory for tests and headless runs, files on disk for the desktop
//! shell.

use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors from a storage backend.
///
/// Domain actors absorb these (state is left untouched and the failure is
/// logged); they are surfaced only to code talking to a store directly.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no storage directory available on this platform")]
    NoStorageDir,
}

/// Local-storage-shaped persistence: whole string values under string keys.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` when absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`; absent keys are a no-op.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
