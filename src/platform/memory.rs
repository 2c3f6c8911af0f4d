//! In-memory storage backend.

use super::{KeyValueStore, StorageError};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// In-process key-value store.
///
/// The default backend for tests and headless runs; nothing survives the
/// process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();

        assert!(store.get_item("missing").unwrap().is_none());

        store.set_item("node-rotations", "{}").unwrap();
        assert_eq!(
            store.get_item("node-rotations").unwrap().as_deref(),
            Some("{}")
        );

        store.set_item("node-rotations", r#"{"dev0":90}"#).unwrap();
        assert_eq!(
            store.get_item("node-rotations").unwrap().as_deref(),
            Some(r#"{"dev0":90}"#)
        );

        store.remove_item("node-rotations").unwrap();
        assert!(store.get_item("node-rotations").unwrap().is_none());
    }
}
