use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use ck_core::ports::KeyValueStorePort;
use ck_core::StorageError;
use serde_json::{Map, Value};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

/// Key-value store backed by one JSON object on disk.
///
/// Every write rewrites the whole blob through a temp file and a rename, so
/// the file always holds either the previous or the new contents.
pub struct FileKeyValueStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Reads the whole blob. A missing file is an empty store.
    async fn read_all(&self) -> Result<Map<String, Value>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("read store failed: {}", self.path.display()))
            }
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content).context("parse store failed")? {
            Value::Object(map) => Ok(map),
            _ => bail!("store root is not a JSON object: {}", self.path.display()),
        }
    }

    async fn atomic_write(&self, content: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create store dir failed: {}", dir.display()))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp store failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp store to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let mut map = self
            .read_all()
            .await
            .map_err(|e| StorageError::read(key, format!("{e:#}")))?;
        Ok(map.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut map = self
            .read_all()
            .await
            .map_err(|e| StorageError::write(key, format!("{e:#}")))?;
        map.insert(key.to_string(), value);

        let content = serde_json::to_string_pretty(&Value::Object(map))
            .map_err(|e| StorageError::write(key, e.to_string()))?;
        self.atomic_write(&content)
            .await
            .map_err(|e| StorageError::write(key, format!("{e:#}")))?;

        debug!(key, path = %self.path.display(), "store key written");
        Ok(())
    }
}
