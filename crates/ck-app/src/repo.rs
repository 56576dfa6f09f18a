//! Typed reads and writes of the stored keys.

use std::collections::BTreeMap;

use ck_core::entry::{migrate_records, sort_canonical};
use ck_core::ports::kv_store::keys;
use ck_core::ports::{ClockPort, KeyValueStorePort};
use ck_core::{Entry, Settings, StorageError, TagCatalog};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

/// Loads history in canonical order, migrating loose records on the way.
///
/// A batch that needed fresh timestamps or dropped records is written back
/// once, so the assigned timestamps stay stable on the next load.
pub(crate) async fn load_entries(
    store: &dyn KeyValueStorePort,
    clock: &dyn ClockPort,
) -> Result<Vec<Entry>, StorageError> {
    let records = match store.get(keys::CLIPBOARD_HISTORY).await? {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(records)) => records,
        Some(_) => {
            return Err(StorageError::corrupt(
                keys::CLIPBOARD_HISTORY,
                "expected an array of entries",
            ))
        }
    };

    let mut next = clock.now_ms();
    let migrated = migrate_records(records, || {
        let ts = next;
        next += 1;
        ts
    });
    for (index, reason) in &migrated.rejected {
        warn!(index, %reason, "dropping unreadable stored entry");
    }

    let rewrite = migrated.needs_rewrite();
    let mut entries = migrated.entries;
    sort_canonical(&mut entries);

    if rewrite {
        match persist_entries(store, &entries).await {
            Ok(()) => info!(
                fresh = migrated.fresh_timestamps,
                dropped = migrated.rejected.len(),
                "stored history migrated"
            ),
            Err(e) => warn!(error = %e, "failed to write back migrated history"),
        }
    }
    Ok(entries)
}

pub(crate) async fn persist_entries(
    store: &dyn KeyValueStorePort,
    entries: &[Entry],
) -> Result<(), StorageError> {
    let value = serde_json::to_value(entries)
        .map_err(|e| StorageError::write(keys::CLIPBOARD_HISTORY, e.to_string()))?;
    store.set(keys::CLIPBOARD_HISTORY, value).await
}

pub(crate) async fn load_catalog(store: &dyn KeyValueStorePort) -> Result<TagCatalog, StorageError> {
    let tags: Vec<String> = load_or_default(store, keys::TAGS).await?;
    let colors: BTreeMap<String, String> = load_or_default(store, keys::TAG_COLORS).await?;
    Ok(TagCatalog::new(tags, colors))
}

pub(crate) async fn persist_catalog(
    store: &dyn KeyValueStorePort,
    catalog: &TagCatalog,
) -> Result<(), StorageError> {
    let tags = serde_json::to_value(&catalog.tags)
        .map_err(|e| StorageError::write(keys::TAGS, e.to_string()))?;
    let colors = serde_json::to_value(&catalog.colors)
        .map_err(|e| StorageError::write(keys::TAG_COLORS, e.to_string()))?;
    store.set(keys::TAGS, tags).await?;
    store.set(keys::TAG_COLORS, colors).await
}

/// `Ok(None)` when settings were never written.
pub(crate) async fn load_settings(
    store: &dyn KeyValueStorePort,
) -> Result<Option<Settings>, StorageError> {
    match store.get(keys::SETTINGS).await? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| StorageError::corrupt(keys::SETTINGS, e.to_string())),
    }
}

pub(crate) async fn persist_settings(
    store: &dyn KeyValueStorePort,
    settings: &Settings,
) -> Result<(), StorageError> {
    let value = serde_json::to_value(settings)
        .map_err(|e| StorageError::write(keys::SETTINGS, e.to_string()))?;
    store.set(keys::SETTINGS, value).await
}

/// Missing or unreadable values fall back to the default with a warning.
async fn load_or_default<T>(store: &dyn KeyValueStorePort, key: &str) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    match store.get(key).await? {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => Ok(serde_json::from_value(value).unwrap_or_else(|e| {
            warn!(key, error = %e, "ignoring malformed stored value");
            T::default()
        })),
    }
}
