//! Use cases bridging the system clipboard and the history store.

use std::sync::Arc;

use ck_core::ports::{ClockPort, SystemClipboardPort};
use ck_core::ClipboardError;
use tracing::{info, info_span, Instrument};

use super::history::{HistoryStore, NewEntry};

/// Saves whatever text is on the system clipboard.
pub struct CaptureClipboard {
    clipboard: Arc<dyn SystemClipboardPort>,
    history: HistoryStore,
    clock: Arc<dyn ClockPort>,
}

impl CaptureClipboard {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        history: HistoryStore,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            clipboard,
            history,
            clock,
        }
    }

    /// `Ok(false)` when the clipboard holds no usable text or the save failed.
    /// Access errors propagate so the caller can explain them.
    pub async fn execute(&self) -> Result<bool, ClipboardError> {
        let span = info_span!("usecase.clipboard.capture");
        async {
            let text = self.clipboard.read_text().await?;
            if text.trim().is_empty() {
                info!("clipboard is empty, nothing to save");
                return Ok(false);
            }
            Ok(self
                .history
                .save(NewEntry::new(text, self.clock.now_ms()))
                .await)
        }
        .instrument(span)
        .await
    }
}

/// Puts an entry back on the system clipboard and refreshes it to the top.
pub struct CopyEntryToClipboard {
    clipboard: Arc<dyn SystemClipboardPort>,
    history: HistoryStore,
    clock: Arc<dyn ClockPort>,
}

impl CopyEntryToClipboard {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        history: HistoryStore,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            clipboard,
            history,
            clock,
        }
    }

    /// `Ok(false)` when no entry has `timestamp`. After a successful copy the
    /// entry carries the current time as its timestamp.
    pub async fn execute(&self, timestamp: i64) -> Result<bool, ClipboardError> {
        let span = info_span!("usecase.clipboard.copy_entry", timestamp);
        async {
            let Some(entry) = self.history.find(timestamp).await else {
                return Ok(false);
            };
            self.clipboard.write_text(&entry.text).await?;
            self.history
                .save(NewEntry::new(entry.text, self.clock.now_ms()))
                .await;
            info!("entry copied to clipboard");
            Ok(true)
        }
        .instrument(span)
        .await
    }
}
