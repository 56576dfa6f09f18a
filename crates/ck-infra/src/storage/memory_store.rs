use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use ck_core::ports::KeyValueStorePort;
use ck_core::StorageError;
use serde_json::Value;

/// Process-local store. Used for tests and ephemeral sessions.
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    values: Mutex<HashMap<String, Value>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a key, e.g. with data written by an older version.
    pub fn with_value(self, key: &str, value: Value) -> Self {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value);
        }
        self
    }
}

#[async_trait]
impl KeyValueStorePort for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let values = self
            .values
            .lock()
            .map_err(|e| StorageError::read(key, e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| StorageError::write(key, e.to_string()))?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = InMemoryKeyValueStore::new().with_value("a", json!(1));
        store.set("b", json!({ "x": true })).await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some(json!(1)));
        assert_eq!(store.get("b").await.unwrap(), Some(json!({ "x": true })));
    }
}
