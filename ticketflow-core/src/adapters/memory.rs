//! In-memory slot storage
//!
//! Backs tests and throwaway sessions. Nothing survives the process.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::ports::KeyValueStorage;

#[derive(Debug, Default)]
pub struct InMemoryStorage {
    slots: Mutex<BTreeMap<String, String>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with the given slots
    pub fn with_slots<K, V>(slots: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = slots
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            slots: Mutex::new(map),
        }
    }

    fn with_map<T>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> T) -> Result<T> {
        let mut map = self
            .slots
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        Ok(f(&mut map))
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_map(|map| map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_map(|map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_map(|map| {
            map.remove(key);
        })
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.with_map(|map| map.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = InMemoryStorage::new();
        assert_eq!(storage.get("tickets").unwrap(), None);

        storage.set("tickets", "[]").unwrap();
        assert_eq!(storage.get("tickets").unwrap().as_deref(), Some("[]"));

        storage.remove("tickets").unwrap();
        assert_eq!(storage.get("tickets").unwrap(), None);
    }

    #[test]
    fn test_with_slots() {
        let storage = InMemoryStorage::with_slots([("b", "2"), ("a", "1")]);
        assert_eq!(storage.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }
}
