use std::sync::Arc;

use ck_app::{App, AppDeps};
use ck_core::ports::SystemClipboardPort;
use ck_infra::{FileKeyValueStore, SystemClock};
use ck_platform::{ClipboardRsAdapter, UnavailableClipboard};
use tracing::{info, warn};

use super::AppPaths;

/// Builds the application over the file store at `paths.store_file`.
///
/// A host without a usable clipboard still gets a working history; only the
/// clipboard use cases report `Unavailable`.
pub fn build_app(paths: &AppPaths) -> App {
    let clipboard: Arc<dyn SystemClipboardPort> = match ClipboardRsAdapter::new() {
        Ok(adapter) => Arc::new(adapter),
        Err(e) => {
            warn!(error = %e, "system clipboard unavailable");
            Arc::new(UnavailableClipboard::new(e.to_string()))
        }
    };

    info!(store = %paths.store_file.display(), "wiring application");

    App::new(AppDeps {
        store: Arc::new(FileKeyValueStore::new(&paths.store_file)),
        clock: Arc::new(SystemClock),
        clipboard,
    })
}
