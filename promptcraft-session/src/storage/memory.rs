use super::{SessionStorage, StorageKey};
use crate::error::SessionError;
use dashmap::DashMap;

/// Process-local storage. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStorage {
    values: DashMap<StorageKey, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: StorageKey) -> Result<Option<String>, SessionError> {
        Ok(self.values.get(&key).map(|v| v.clone()))
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), SessionError> {
        self.values.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), SessionError> {
        self.values.remove(&key);
        Ok(())
    }
}
