//! Use case for listing the history the way the popup shows it

use ck_core::display::display_time;
use ck_core::ports::ClockPort;
use ck_core::query::{paginate, view};
use ck_core::{FilterSelector, Page};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use super::history::HistoryStore;

/// One rendered page plus a time label per item.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    #[serde(flatten)]
    pub page: Page,
    pub time_labels: Vec<String>,
}

pub struct BrowseHistory {
    history: HistoryStore,
    clock: Arc<dyn ClockPort>,
}

impl BrowseHistory {
    pub fn new(history: HistoryStore, clock: Arc<dyn ClockPort>) -> Self {
        Self { history, clock }
    }

    /// Searches, filters and pages the stored history. `page` is 1-based.
    pub async fn execute(&self, search: &str, filter: &FilterSelector, page: usize) -> HistoryPage {
        let settings = self.history.settings().load().await;
        let entries = self.history.load().await;
        let matched = view(&entries, search, filter);
        debug!(%filter, total = entries.len(), matched = matched.len(), "history view built");

        let page = paginate(matched, page, settings.items_per_page);
        let now = self.clock.now_ms();
        let time_labels = page
            .items
            .iter()
            .map(|e| display_time(e.timestamp, now, settings.show_relative_time))
            .collect();
        HistoryPage { page, time_labels }
    }
}
