//! Use case for exporting history to text formats and importing it back

use std::sync::Arc;

use ck_core::codec::{self, ExportFormat};
use ck_core::ports::ClockPort;
use ck_core::ParseError;
use serde::Serialize;
use tracing::{error, info, warn};

use super::history::{HistoryStore, NewEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub rejected: usize,
}

pub struct TransferHistory {
    history: HistoryStore,
    clock: Arc<dyn ClockPort>,
}

impl TransferHistory {
    pub fn new(history: HistoryStore, clock: Arc<dyn ClockPort>) -> Self {
        Self { history, clock }
    }

    /// Renders the whole history in canonical order.
    pub async fn export(&self, format: ExportFormat) -> Option<String> {
        let entries = self.history.load().await;
        match codec::export(&entries, format) {
            Ok(out) => {
                info!(%format, count = entries.len(), "history exported");
                Some(out)
            }
            Err(e) => {
                error!(%format, error = %e, "failed to export history");
                None
            }
        }
    }

    /// Parses `raw` and saves each candidate in turn, so duplicates refresh
    /// and capacity eviction apply as for manual saves.
    #[tracing::instrument(name = "usecase.transfer.import", skip(self, raw), fields(len = raw.len()))]
    pub async fn import(&self, raw: &str) -> Result<ImportReport, ParseError> {
        let batch = codec::import(raw, self.clock.now_ms())?;
        let mut report = ImportReport {
            imported: 0,
            rejected: batch.rejected.len(),
        };
        for (index, reason) in &batch.rejected {
            warn!(index, %reason, "skipping import candidate");
        }

        for candidate in batch.candidates {
            if self.history.save(NewEntry::from(candidate)).await {
                report.imported += 1;
            } else {
                report.rejected += 1;
            }
        }

        info!(imported = report.imported, rejected = report.rejected, "import finished");
        Ok(report)
    }
}
