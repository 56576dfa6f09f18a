pub mod browse;
pub mod clipboard;
pub mod history;
pub mod settings;
pub mod tags;
pub mod transfer;

pub use browse::{BrowseHistory, HistoryPage};
pub use clipboard::{CaptureClipboard, CopyEntryToClipboard};
pub use history::{HistoryStore, NewEntry};
pub use settings::SettingsStore;
pub use tags::TagRegistry;
pub use transfer::{ImportReport, TransferHistory};
