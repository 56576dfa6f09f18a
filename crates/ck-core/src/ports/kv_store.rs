use async_trait::async_trait;
use serde_json::Value;

use crate::error::StorageError;

/// Keys used in the backing store.
pub mod keys {
    pub const CLIPBOARD_HISTORY: &str = "clipboardHistory";
    pub const SETTINGS: &str = "settings";
    pub const TAGS: &str = "tags";
    pub const TAG_COLORS: &str = "tagColors";
}

/// Flat asynchronous key-value store holding JSON values.
///
/// There is no cross-instance locking: two writers doing read-modify-write on
/// the same key can lose an update.
#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    /// `Ok(None)` when the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
}
