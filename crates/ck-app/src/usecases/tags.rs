use std::sync::Arc;

use ck_core::ports::{ClockPort, KeyValueStorePort};
use ck_core::{StorageError, TagCatalog};
use tracing::{error, info};

use crate::repo;

/// Global tag set and stable tag colors.
#[derive(Clone)]
pub struct TagRegistry {
    store: Arc<dyn KeyValueStorePort>,
    clock: Arc<dyn ClockPort>,
}

impl TagRegistry {
    pub fn new(store: Arc<dyn KeyValueStorePort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { store, clock }
    }

    /// Known tags and their colors; empty when the store is unreadable.
    pub async fn catalog(&self) -> TagCatalog {
        repo::load_catalog(self.store.as_ref())
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "failed to load tag catalog");
                TagCatalog::default()
            })
    }

    /// Merges `tags` into the global set, coloring the ones never seen.
    pub async fn register_tags(&self, tags: &[String]) -> bool {
        match self.try_register(tags).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "failed to register tags");
                false
            }
        }
    }

    async fn try_register(&self, tags: &[String]) -> Result<(), StorageError> {
        let mut catalog = repo::load_catalog(self.store.as_ref()).await?;
        let added = catalog.register(tags);
        if added.is_empty() {
            return Ok(());
        }
        repo::persist_catalog(self.store.as_ref(), &catalog).await?;
        info!(?added, "registered new tags");
        Ok(())
    }

    /// Removes `tag` from the catalog and from every entry carrying it.
    #[tracing::instrument(name = "usecase.tags.remove_globally", skip(self))]
    pub async fn remove_tag_globally(&self, tag: &str) -> bool {
        match self.try_remove_globally(tag).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "failed to remove tag");
                false
            }
        }
    }

    async fn try_remove_globally(&self, tag: &str) -> Result<(), StorageError> {
        let mut entries = repo::load_entries(self.store.as_ref(), self.clock.as_ref()).await?;
        let mut stripped = 0usize;
        for entry in entries.iter_mut() {
            if entry.tags.remove(tag) {
                stripped += 1;
            }
        }
        if stripped > 0 {
            repo::persist_entries(self.store.as_ref(), &entries).await?;
        }

        let mut catalog = repo::load_catalog(self.store.as_ref()).await?;
        if catalog.forget(tag) {
            repo::persist_catalog(self.store.as_ref(), &catalog).await?;
        }

        info!(stripped, "tag removed from history");
        Ok(())
    }
}
