use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Key/value persistence for serialized document snapshots.
///
/// Saving under an existing key replaces the previous snapshot.
pub trait SnapshotStore {
    fn save(&mut self, key: &str, serialized: &str) -> Result<(), StorageError>;

    /// `Ok(None)` when nothing has been saved under `key` yet
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
}

/// Stores each snapshot as `<root>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl SnapshotStore for FileStore {
    fn save(&mut self, key: &str, serialized: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        // Create the storage directory on first save
        fs::create_dir_all(&self.root)?;

        fs::write(&path, serialized)?;
        log::debug!("Saved {} bytes to {}", serialized.len(), path.display());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }
}

/// In-process store, used by tests and hosts that don't persist
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, key: &str, serialized: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries.insert(key.to_string(), serialized.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.entries.get(key).cloned())
    }
}

/// Keys become file names, so they must be a single non-empty path component
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains(['/', '\\', '\0']);
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::create_test_storage_dir;
    use rstest::rstest;

    #[test]
    fn test_save_and_load_round_trip() {
        // Given a file store in an empty directory
        let dir = create_test_storage_dir();
        let mut store = FileStore::new(dir.path());

        // When saving a snapshot
        store.save("SavedContent", r#"{"blocks":[]}"#).unwrap();

        // Then it loads back unchanged
        let loaded = store.load("SavedContent").unwrap();
        assert_eq!(loaded.as_deref(), Some(r#"{"blocks":[]}"#));
        assert!(dir.path().join("SavedContent.json").exists());
    }

    #[test]
    fn test_load_missing_key_is_none() {
        let dir = create_test_storage_dir();
        let store = FileStore::new(dir.path());

        assert_eq!(store.load("nothing-here").unwrap(), None);
    }

    #[test]
    fn test_save_creates_storage_directory() {
        let dir = create_test_storage_dir();
        let root = dir.path().join("nested").join("store");
        let mut store = FileStore::new(&root);

        store.save("doc", "{}").unwrap();

        assert!(root.is_dir());
        assert_eq!(store.load("doc").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_save_overwrites_existing() {
        let dir = create_test_storage_dir();
        let mut store = FileStore::new(dir.path());

        store.save("doc", "first").unwrap();
        store.save("doc", "second").unwrap();

        assert_eq!(store.load("doc").unwrap().as_deref(), Some("second"));
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("..")]
    #[case("a/b")]
    #[case("..\\up")]
    fn test_invalid_keys_are_rejected(#[case] key: &str) {
        let dir = create_test_storage_dir();
        let mut store = FileStore::new(dir.path());

        assert!(matches!(
            store.save(key, "{}"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(store.load(key), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load("k").unwrap(), None);

        store.save("k", "v").unwrap();

        assert_eq!(store.get("k"), Some("v"));
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v"));
    }
}
