//! Platform adapters for ClipKeep.
pub mod clipboard;

pub use clipboard::{ClipboardRsAdapter, UnavailableClipboard};
