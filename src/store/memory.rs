use std::collections::HashMap;
use std::sync::Mutex;

use crate::app::{Result, TributaryError};
use crate::store::KeyValueStore;

/// Non-durable substrate for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| TributaryError::Other(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set_string(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| TributaryError::Other(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
