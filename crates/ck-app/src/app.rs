use crate::deps::AppDeps;
use crate::usecases::{
    BrowseHistory, CaptureClipboard, CopyEntryToClipboard, HistoryStore, SettingsStore,
    TagRegistry, TransferHistory,
};

/// Every use case of one popup instance, sharing the same store, clock and
/// clipboard. Tags, tag colors and settings live in the store, so building a
/// fresh `App` over a fresh store gives a fresh state.
pub struct App {
    pub history: HistoryStore,
    pub browse: BrowseHistory,
    pub transfer: TransferHistory,
    pub capture: CaptureClipboard,
    pub copy: CopyEntryToClipboard,
}

impl App {
    pub fn new(deps: AppDeps) -> Self {
        let history = HistoryStore::new(deps.store, deps.clock.clone());
        Self {
            browse: BrowseHistory::new(history.clone(), deps.clock.clone()),
            transfer: TransferHistory::new(history.clone(), deps.clock.clone()),
            capture: CaptureClipboard::new(
                deps.clipboard.clone(),
                history.clone(),
                deps.clock.clone(),
            ),
            copy: CopyEntryToClipboard::new(deps.clipboard, history.clone(), deps.clock),
            history,
        }
    }

    pub fn tags(&self) -> &TagRegistry {
        self.history.tags()
    }

    pub fn settings(&self) -> &SettingsStore {
        self.history.settings()
    }
}
