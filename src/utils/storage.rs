use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use web_sys::{window, Storage};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage backend is not available")]
    Unavailable,
    #[error("could not serialize value for key {0}")]
    Serialize(String),
    #[error("write to storage failed for key {0}")]
    Write(String),
}

/// Minimal key/value surface shared by the browser storage areas and the
/// in-memory test store. The session store only ever talks to this trait.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// Which browser storage area backs a [`BrowserStorage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageArea {
    /// `localStorage`: survives browser restarts.
    Durable,
    /// `sessionStorage`: cleared when the tab/session ends.
    SessionScoped,
}

pub struct BrowserStorage {
    area: StorageArea,
}

impl BrowserStorage {
    pub fn durable() -> Self {
        Self { area: StorageArea::Durable }
    }

    pub fn session_scoped() -> Self {
        Self { area: StorageArea::SessionScoped }
    }

    fn raw(&self) -> Option<Storage> {
        let window = window()?;
        match self.area {
            StorageArea::Durable => window.local_storage().ok()?,
            StorageArea::SessionScoped => window.session_storage().ok()?,
        }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.raw()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.raw().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.raw() {
            let _ = storage.remove_item(key);
        }
    }
}

pub fn save_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json =
        serde_json::to_string(value).map_err(|_| StorageError::Serialize(key.to_string()))?;
    store.set(key, &json)
}

pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    serde_json::from_str(&store.get(key)?).ok()
}

/// In-memory store used by the unit tests, where no browser is around.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    entries: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_helpers_round_trip() {
        let store = MemoryStore::default();
        save_json(&store, "k", &vec![1, 2, 3]).unwrap();
        let loaded: Vec<i32> = load_json(&store, "k").unwrap();
        assert_eq!(loaded, vec![1, 2, 3]);
    }

    #[test]
    fn load_json_tolerates_missing_and_corrupt_entries() {
        let store = MemoryStore::default();
        assert_eq!(load_json::<Vec<i32>>(&store, "missing"), None);
        store.set("bad", "{not json").unwrap();
        assert_eq!(load_json::<Vec<i32>>(&store, "bad"), None);
    }
}
