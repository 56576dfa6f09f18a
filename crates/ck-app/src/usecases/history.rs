//! The clipboard history store.
//!
//! Every operation is a read-modify-write of the whole collection. Storage
//! failures stop at this boundary: they are logged and surface as `false`,
//! `None` or an empty result.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use ck_core::entry::{
    enforce_capacity, next_free_timestamp, sort_canonical, sweep_expired,
};
use ck_core::ports::kv_store::keys;
use ck_core::ports::{ClockPort, KeyValueStorePort};
use ck_core::tags::parse_tag_list;
use ck_core::{ContentType, Entry, HistoryStats, StorageError, ValidationError};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::settings::SettingsStore;
use super::tags::TagRegistry;
use crate::repo;

/// A snippet to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub text: String,
    pub timestamp: i64,
    pub favorite: bool,
    /// Classified from the text when absent.
    pub content_type: Option<ContentType>,
    pub pinned: bool,
    pub tags: BTreeSet<String>,
}

impl NewEntry {
    pub fn new(text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            text: text.into(),
            timestamp,
            favorite: false,
            content_type: None,
            pinned: false,
            tags: BTreeSet::new(),
        }
    }

    pub fn favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    pub fn with_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    fn into_entry(self) -> Result<Entry, ValidationError> {
        let mut entry = Entry::new(self.text, self.timestamp)?
            .with_favorite(self.favorite)
            .with_pinned(self.pinned)
            .with_tags(self.tags);
        if let Some(content_type) = self.content_type {
            entry.content_type = content_type;
        }
        Ok(entry)
    }
}

impl From<Entry> for NewEntry {
    fn from(entry: Entry) -> Self {
        Self {
            text: entry.text,
            timestamp: entry.timestamp,
            favorite: entry.favorite,
            content_type: Some(entry.content_type),
            pinned: entry.pinned,
            tags: entry.tags,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveOutcome {
    Inserted,
    Refreshed,
}

#[derive(Clone)]
pub struct HistoryStore {
    store: Arc<dyn KeyValueStorePort>,
    clock: Arc<dyn ClockPort>,
    settings: SettingsStore,
    tags: TagRegistry,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStorePort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            settings: SettingsStore::new(store.clone()),
            tags: TagRegistry::new(store.clone(), clock.clone()),
            store,
            clock,
        }
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    /// The collection in canonical order.
    pub async fn load(&self) -> Vec<Entry> {
        soft("load", self.load_entries().await, Vec::new())
    }

    pub async fn find(&self, timestamp: i64) -> Option<Entry> {
        self.load()
            .await
            .into_iter()
            .find(|e| e.timestamp == timestamp)
    }

    /// The stored sequence exactly as persisted, for background export.
    pub async fn raw_entries(&self) -> Value {
        match self.store.get(keys::CLIPBOARD_HISTORY).await {
            Ok(Some(value @ Value::Array(_))) => value,
            Ok(_) => Value::Array(Vec::new()),
            Err(e) => {
                error!(error = %e, "failed to read raw history");
                Value::Array(Vec::new())
            }
        }
    }

    /// Saves a snippet. Saving text that already exists only moves the
    /// existing entry to `item.timestamp`.
    #[tracing::instrument(
        name = "usecase.history.save",
        skip(self, item),
        fields(timestamp = item.timestamp)
    )]
    pub async fn save(&self, item: NewEntry) -> bool {
        let entry = match item.into_entry() {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "rejecting entry");
                return false;
            }
        };
        let tags: Vec<String> = entry.tags.iter().cloned().collect();

        match self.try_save(entry).await {
            Ok(SaveOutcome::Inserted) => {
                if !tags.is_empty() {
                    self.tags.register_tags(&tags).await;
                }
                true
            }
            Ok(SaveOutcome::Refreshed) => true,
            Err(e) => {
                error!(error = %e, "failed to save entry");
                false
            }
        }
    }

    async fn try_save(&self, entry: Entry) -> Result<SaveOutcome, StorageError> {
        let mut entries = self.load_entries().await?;

        if entries.iter().any(|e| e.text == entry.text) {
            let others = entries.iter().filter(|e| e.text != entry.text);
            let timestamp = next_free_timestamp(others, entry.timestamp);
            if let Some(existing) = entries.iter_mut().find(|e| e.text == entry.text) {
                existing.timestamp = timestamp;
            }
            sort_canonical(&mut entries);
            self.persist(&entries).await?;
            debug!("refreshed existing entry");
            return Ok(SaveOutcome::Refreshed);
        }

        let mut entry = entry;
        entry.timestamp = next_free_timestamp(&entries, entry.timestamp);
        entries.push(entry);
        let settings = self.settings.load().await;
        let (mut entries, evicted) = enforce_capacity(entries, settings.max_items);
        let mut expired = 0;
        if settings.auto_delete {
            let (kept, removed) =
                sweep_expired(entries, self.clock.now_ms(), settings.auto_delete_days);
            entries = kept;
            expired = removed;
        }

        self.persist(&entries).await?;
        info!(evicted, expired, total = entries.len(), "entry saved");
        Ok(SaveOutcome::Inserted)
    }

    /// Removes the entry with `timestamp`. `false` when there is none.
    pub async fn delete(&self, timestamp: i64) -> bool {
        soft("delete", self.try_delete(timestamp).await, false)
    }

    async fn try_delete(&self, timestamp: i64) -> Result<bool, StorageError> {
        let mut entries = self.load_entries().await?;
        let Some(position) = entries.iter().position(|e| e.timestamp == timestamp) else {
            debug!(timestamp, "delete: no such entry");
            return Ok(false);
        };
        entries.remove(position);
        self.persist(&entries).await?;
        Ok(true)
    }

    /// Removes every entry whose timestamp is listed. Returns how many went.
    pub async fn delete_many(&self, timestamps: &[i64]) -> usize {
        soft("delete_many", self.try_delete_many(timestamps).await, 0)
    }

    async fn try_delete_many(&self, timestamps: &[i64]) -> Result<usize, StorageError> {
        let doomed: HashSet<i64> = timestamps.iter().copied().collect();
        let mut entries = self.load_entries().await?;
        let before = entries.len();
        entries.retain(|e| !doomed.contains(&e.timestamp));
        let removed = before - entries.len();
        if removed > 0 {
            self.persist(&entries).await?;
        }
        Ok(removed)
    }

    /// Keeps only `(keep_pinned && pinned) || (keep_favorites && favorite)`.
    #[tracing::instrument(name = "usecase.history.clear", skip(self))]
    pub async fn clear(&self, keep_favorites: bool, keep_pinned: bool) -> bool {
        soft(
            "clear",
            self.try_clear(keep_favorites, keep_pinned).await,
            false,
        )
    }

    async fn try_clear(&self, keep_favorites: bool, keep_pinned: bool) -> Result<bool, StorageError> {
        let mut entries = if keep_favorites || keep_pinned {
            self.load_entries().await?
        } else {
            Vec::new()
        };
        entries.retain(|e| (keep_pinned && e.pinned) || (keep_favorites && e.favorite));
        self.persist(&entries).await?;
        info!(kept = entries.len(), "history cleared");
        Ok(true)
    }

    /// Returns the new favorite state, `None` if the entry is missing.
    pub async fn toggle_favorite(&self, timestamp: i64) -> Option<bool> {
        let result = self
            .mutate(timestamp, |entry| {
                entry.favorite = !entry.favorite;
                entry.favorite
            })
            .await;
        soft("toggle_favorite", result, None)
    }

    /// Returns the new pinned state, `None` if the entry is missing.
    pub async fn toggle_pin(&self, timestamp: i64) -> Option<bool> {
        let result = self
            .mutate(timestamp, |entry| {
                entry.pinned = !entry.pinned;
                entry.pinned
            })
            .await;
        soft("toggle_pin", result, None)
    }

    /// Adds tags to one entry and registers the ones never seen before.
    /// Each input may hold several comma-separated names.
    pub async fn add_tags(&self, timestamp: i64, tags: &[String]) -> bool {
        let mut names: Vec<String> = Vec::new();
        for tag in tags.iter().flat_map(|t| parse_tag_list(t)) {
            if !names.contains(&tag) {
                names.push(tag);
            }
        }
        if names.is_empty() {
            return false;
        }

        let result = self
            .mutate(timestamp, |entry| entry.tags.extend(names.iter().cloned()))
            .await;
        if soft("add_tags", result, None).is_none() {
            return false;
        }
        if !self.tags.register_tags(&names).await {
            warn!(timestamp, "entry tagged but tag catalog not updated");
        }
        true
    }

    /// Removes one tag from one entry. `false` if either is missing.
    pub async fn remove_tag(&self, timestamp: i64, tag: &str) -> bool {
        let result = self
            .mutate(timestamp, |entry| entry.tags.remove(tag))
            .await;
        soft("remove_tag", result, None).unwrap_or(false)
    }

    pub async fn stats(&self) -> Option<HistoryStats> {
        let entries = match self.load_entries().await {
            Ok(entries) => entries,
            Err(e) => {
                error!(error = %e, "failed to load history for stats");
                return None;
            }
        };
        let settings = self.settings.load().await;
        HistoryStats::compute(&entries, settings.max_items)
            .map_err(|e| error!(error = %e, "failed to measure history"))
            .ok()
    }

    /// Applies the auto-delete rule to the stored collection, when enabled.
    /// Returns how many entries expired.
    #[tracing::instrument(name = "usecase.history.sweep_expired", skip(self))]
    pub async fn sweep_expired(&self) -> usize {
        soft("sweep_expired", self.try_sweep().await, 0)
    }

    async fn try_sweep(&self) -> Result<usize, StorageError> {
        let settings = self.settings.load().await;
        if !settings.auto_delete {
            return Ok(0);
        }
        let entries = self.load_entries().await?;
        let (kept, removed) =
            sweep_expired(entries, self.clock.now_ms(), settings.auto_delete_days);
        if removed > 0 {
            self.persist(&kept).await?;
            info!(removed, "expired entries removed");
        }
        Ok(removed)
    }

    /// Applies `f` to the entry with `timestamp` and persists in canonical
    /// order. `Ok(None)` when no entry matches.
    async fn mutate<T>(
        &self,
        timestamp: i64,
        f: impl FnOnce(&mut Entry) -> T,
    ) -> Result<Option<T>, StorageError> {
        let mut entries = self.load_entries().await?;
        let Some(entry) = entries.iter_mut().find(|e| e.timestamp == timestamp) else {
            debug!(timestamp, "no such entry");
            return Ok(None);
        };
        let out = f(entry);
        sort_canonical(&mut entries);
        self.persist(&entries).await?;
        Ok(Some(out))
    }

    async fn load_entries(&self) -> Result<Vec<Entry>, StorageError> {
        repo::load_entries(self.store.as_ref(), self.clock.as_ref()).await
    }

    async fn persist(&self, entries: &[Entry]) -> Result<(), StorageError> {
        repo::persist_entries(self.store.as_ref(), entries).await
    }
}

fn soft<T>(operation: &'static str, result: Result<T, StorageError>, fallback: T) -> T {
    result.unwrap_or_else(|e| {
        error!(operation, error = %e, "history storage failure");
        fallback
    })
}
