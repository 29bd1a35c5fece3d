//! Durable client-local key/value storage.
//!
//! The dashboard keeps a handful of string flags that must survive restarts
//! (for example, whether the onboarding tour was completed). This module
//! exposes the [`DurableStore`] abstraction, a JSON-file implementation that
//! writes to the standard configuration directory
//! (`~/.config/learnova/tour_state.json` on most platforms), and an in-memory
//! implementation for tests and ephemeral sessions.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::{debug, warn};

use crate::path_processing::{app_config_dir, expand_tilde};

/// Environment variable allowing callers to override the store file path.
pub const STORE_PATH_ENV: &str = "LEARNOVA_STORE_PATH";

/// Default filename for the JSON payload.
pub const STORE_FILE_NAME: &str = "tour_state.json";

/// Errors surfaced by durable store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O failure (for example, permissions or a read-only filesystem).
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The backend refuses all access (storage disabled).
    #[error("durable storage unavailable: {0}")]
    Unavailable(String),
}

/// Minimal string key/value store that survives restarts.
pub trait DurableStore: Send + Sync {
    /// Read the value stored under `key`; `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`; removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

type Entries = BTreeMap<String, String>;

/// JSON-backed store persisted on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl JsonFileStore {
    /// Create a store at the provided path (or the default path when omitted).
    pub fn new<P: Into<Option<PathBuf>>>(path: P) -> Result<Self, StoreError> {
        let resolved_path = match path.into() {
            Some(path) => expand_tilde(&path.to_string_lossy()),
            None => default_store_path(),
        };
        let entries = load_entries(&resolved_path)?;
        debug!(path = %resolved_path.display(), keys = entries.len(), "Loaded durable store");
        Ok(Self {
            path: resolved_path,
            entries: Mutex::new(entries),
        })
    }

    /// Initialize a store at the default location.
    pub fn with_defaults() -> Result<Self, StoreError> {
        Self::new(None::<PathBuf>)
    }

    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save_locked(&self, entries: &Entries) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl DurableStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().expect("store lock poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("store lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        self.save_locked(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("store lock poisoned");
        if entries.remove(key).is_some() {
            self.save_locked(&entries)?;
        }
        Ok(())
    }
}

/// In-memory store used for tests and sessions without a writable config directory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Mutex<Entries>,
}

impl InMemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DurableStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().expect("store lock poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("store lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("store lock poisoned");
        entries.remove(key);
        Ok(())
    }
}

/// Resolve the store location, honoring [`STORE_PATH_ENV`].
pub fn default_store_path() -> PathBuf {
    if let Ok(path) = env::var(STORE_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }
    app_config_dir().join(STORE_FILE_NAME)
}

fn load_entries(path: &Path) -> Result<Entries, StoreError> {
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<Entries>(&content) {
            Ok(entries) => Ok(entries),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse durable store; starting empty"
                );
                Ok(Entries::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Entries::default()),
        Err(error) => Err(StoreError::Io(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn in_memory_store_round_trip() {
        let store = InMemoryStore::new();
        assert!(store.get("flag").unwrap().is_none());

        store.set("flag", "true").unwrap();
        assert_eq!(store.get("flag").unwrap().as_deref(), Some("true"));

        store.remove("flag").unwrap();
        assert!(store.get("flag").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn json_store_persists_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("tour_state.json");
        let store = JsonFileStore::new(Some(path.clone())).unwrap();
        store.set("learnova_tc_tour_completed", "true").unwrap();

        drop(store);
        let reloaded = JsonFileStore::new(Some(path)).unwrap();
        assert_eq!(reloaded.get("learnova_tc_tour_completed").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn json_store_remove_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tour_state.json");
        let store = JsonFileStore::new(Some(path.clone())).unwrap();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();
        store.remove("missing").unwrap();

        drop(store);
        let reloaded = JsonFileStore::new(Some(path)).unwrap();
        assert!(reloaded.get("a").unwrap().is_none());
        assert_eq!(reloaded.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn invalid_json_returns_empty_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tour_state.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::new(Some(path)).unwrap();
        assert!(store.get("anything").unwrap().is_none());
    }

    #[test]
    fn default_path_honors_env_override() {
        let override_path = "~/custom/tour_state.json";
        temp_env::with_var(STORE_PATH_ENV, Some(override_path), || {
            assert_eq!(default_store_path(), expand_tilde(override_path));
        });
    }

    #[test]
    fn write_failure_surfaces_io_error() {
        let dir = tempdir().unwrap();
        // A directory where the file should be makes every write fail.
        let path = dir.path().join("occupied");
        fs::create_dir_all(&path).unwrap();
        let store = JsonFileStore {
            path,
            entries: Mutex::new(Entries::default()),
        };
        assert!(matches!(store.set("k", "v"), Err(StoreError::Io(_))));
    }
}
