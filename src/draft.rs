//! Draft Store
//!
//! Keeps at most one JSON snapshot per key in a reload-surviving key-value
//! backend. Saves happen on every edit; a snapshot that no longer parses is
//! treated as absent.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

/// Key-value backend for drafts (local storage in the browser)
pub trait DraftBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory backend, used by tests and when local storage is disabled
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RefCell<HashMap<String, String>>,
}

impl DraftBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Result of an explicit "restore draft" action
#[derive(Debug, Clone, PartialEq)]
pub enum RestoreOutcome<T> {
    Restored(T),
    /// A draft exists but the user chose not to load it
    Declined,
    NotFound,
}

pub struct DraftStore<B> {
    backend: B,
}

impl<B: DraftBackend> DraftStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Overwrite the draft under `key`. Failures are logged, never raised.
    pub fn save<T: Serialize>(&self, key: &str, data: &T) {
        let json = match serde_json::to_string(data) {
            Ok(json) => json,
            Err(e) => {
                log::error!("[DRAFT] Could not serialize draft {}: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.backend.set(key, &json) {
            log::warn!("[DRAFT] Could not save draft {}: {}", key, e);
        }
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(data) => Some(data),
            Err(e) => {
                log::warn!("[DRAFT] Discarding unreadable draft {}: {}", key, e);
                None
            }
        }
    }

    pub fn clear(&self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            log::warn!("[DRAFT] Could not clear draft {}: {}", key, e);
        }
    }

    /// Load the draft under `key` only if one exists and `confirm` agrees.
    /// `confirm` is not called when there is nothing to restore.
    pub fn restore_with<T, F>(&self, key: &str, confirm: F) -> RestoreOutcome<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> bool,
    {
        let Some(data) = self.load(key) else {
            return RestoreOutcome::NotFound;
        };
        if confirm() {
            RestoreOutcome::Restored(data)
        } else {
            RestoreOutcome::Declined
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Snapshot {
        op: String,
        photo: Option<String>,
    }

    fn snap(op: &str) -> Snapshot {
        Snapshot { op: op.to_string(), photo: None }
    }

    #[test]
    fn test_last_write_wins() {
        let store = DraftStore::new(MemoryBackend::default());
        for op in ["1", "12", "123", "1234"] {
            store.save("form", &snap(op));
        }
        assert_eq!(store.load::<Snapshot>("form"), Some(snap("1234")));
    }

    #[test]
    fn test_clear_removes_draft() {
        let store = DraftStore::new(MemoryBackend::default());
        store.save("form", &snap("7"));
        store.clear("form");
        assert_eq!(store.load::<Snapshot>("form"), None);
        // Clearing twice is harmless
        store.clear("form");
    }

    #[test]
    fn test_keys_are_independent() {
        let store = DraftStore::new(MemoryBackend::default());
        store.save("a", &snap("a"));
        store.save("b", &snap("b"));
        store.clear("a");
        assert_eq!(store.load::<Snapshot>("a"), None);
        assert_eq!(store.load::<Snapshot>("b"), Some(snap("b")));
    }

    #[test]
    fn test_corrupt_draft_is_absent() {
        let store = DraftStore::new(MemoryBackend::default());
        store.backend().set("form", "{\"op\": 12").unwrap();
        assert_eq!(store.load::<Snapshot>("form"), None);
    }

    #[test]
    fn test_embedded_image_survives() {
        let store = DraftStore::new(MemoryBackend::default());
        let data = Snapshot {
            op: "OP-9".to_string(),
            photo: Some("data:image/jpeg;base64,/9j/4AAQSkZJRg==".to_string()),
        };
        store.save("form", &data);
        assert_eq!(store.load::<Snapshot>("form"), Some(data));
    }

    #[test]
    fn test_restore_requires_confirmation() {
        let store = DraftStore::new(MemoryBackend::default());

        let mut asked = false;
        let outcome: RestoreOutcome<Snapshot> = store.restore_with("form", || {
            asked = true;
            true
        });
        assert_eq!(outcome, RestoreOutcome::NotFound);
        assert!(!asked);

        store.save("form", &snap("42"));
        assert_eq!(store.restore_with::<Snapshot, _>("form", || false), RestoreOutcome::Declined);
        assert_eq!(
            store.restore_with::<Snapshot, _>("form", || true),
            RestoreOutcome::Restored(snap("42"))
        );
    }
}
