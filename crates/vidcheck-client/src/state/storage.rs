//! Local key-value storage
//!
//! A process-wide string map, optionally mirrored to a JSON file so it
//! survives restarts. Clones share the same map.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    inner: Arc<RwLock<StorageInner>>,
}

#[derive(Debug, Default)]
struct StorageInner {
    items: BTreeMap<String, String>,
    path: Option<PathBuf>,
}

impl LocalStorage {
    /// Storage that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Storage backed by `path`; a missing or unreadable file starts empty
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = load_items(&path);

        Self {
            inner: Arc::new(RwLock::new(StorageInner {
                items,
                path: Some(path),
            })),
        }
    }

    /// Default file location under the user's data directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("vidcheck").join("local_storage.json"))
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.read().path.clone()
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.read().items.get(key).cloned()
    }

    pub fn set_item(&self, key: &str, value: &str) {
        let mut inner = self.write();
        inner.items.insert(key.to_string(), value.to_string());
        inner.persist();
    }

    /// Drop every key, not just the ones this crate writes
    pub fn clear(&self) {
        let mut inner = self.write();
        inner.items.clear();
        inner.persist();
    }

    pub fn keys(&self) -> Vec<String> {
        self.read().items.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.read().items.is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, StorageInner> {
        // A poisoned lock still holds a consistent map: every write is a single insert or clear
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, StorageInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl StorageInner {
    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };

        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::error!("Failed to create storage directory: {}", e);
                return;
            }
        }

        match serde_json::to_string_pretty(&self.items) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    tracing::error!("Failed to write storage file: {}", e);
                } else {
                    tracing::trace!("Saved local storage to {:?}", path);
                }
            }
            Err(e) => {
                tracing::error!("Failed to serialize local storage: {}", e);
            }
        }
    }
}

fn load_items(path: &Path) -> BTreeMap<String, String> {
    if !path.exists() {
        tracing::debug!("Storage file {:?} does not exist, starting empty", path);
        return BTreeMap::new();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(items) => {
                tracing::debug!("Loaded local storage from {:?}", path);
                items
            }
            Err(e) => {
                tracing::error!("Failed to parse storage file: {}", e);
                BTreeMap::new()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read storage file: {}", e);
            BTreeMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_overwrite() {
        let storage = LocalStorage::in_memory();
        assert_eq!(storage.get_item("token"), None);

        storage.set_item("token", "abc");
        assert_eq!(storage.get_item("token").as_deref(), Some("abc"));

        storage.set_item("token", "def");
        assert_eq!(storage.get_item("token").as_deref(), Some("def"));

        assert_eq!(storage.keys(), vec!["token".to_string()]);
    }

    #[test]
    fn test_clones_share_items() {
        let storage = LocalStorage::in_memory();
        let other = storage.clone();

        other.set_item("theme", "dark");
        assert_eq!(storage.get_item("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = LocalStorage::open(&path);
        storage.set_item("token", "abc");
        storage.set_item("userInfo", "{}");
        drop(storage);

        let reopened = LocalStorage::open(&path);
        assert_eq!(reopened.get_item("token").as_deref(), Some("abc"));
        assert_eq!(reopened.keys(), vec!["token".to_string(), "userInfo".to_string()]);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = LocalStorage::open(&path);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_clear_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let storage = LocalStorage::open(&path);
        storage.set_item("a", "1");
        storage.clear();

        assert!(LocalStorage::open(&path).is_empty());
    }
}
