use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

const APP_DIR_NAME: &str = "clipkeep";

/// Overrides the platform data directory when set and non-empty.
pub const DATA_DIR_ENV: &str = "CLIPKEEP_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub data_root: PathBuf,
    pub store_file: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppPaths {
    pub fn from_data_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            data_root: root.to_path_buf(),
            store_file: root.join("store.json"),
            logs_dir: root.join("logs"),
        }
    }

    /// Resolves the data root from `CLIPKEEP_DATA_DIR`, falling back to
    /// `<platform data dir>/clipkeep`.
    pub fn resolve() -> Result<Self> {
        let root = match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => dirs::data_dir()
                .ok_or_else(|| anyhow!("no platform data directory available"))?
                .join(APP_DIR_NAME),
        };
        Ok(Self::from_data_root(root))
    }
}
