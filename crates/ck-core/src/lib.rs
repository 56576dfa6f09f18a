//! # ck-core
//!
//! Core domain models and business logic for ClipKeep.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod classify;
pub mod codec;
pub mod display;
pub mod entry;
pub mod error;
pub mod ports;
pub mod query;
pub mod settings;
pub mod stats;
pub mod tags;

// Re-export commonly used types at the crate root
pub use classify::classify;
pub use codec::{ExportFormat, ImportBatch};
pub use entry::{ContentType, Entry, MAX_TEXT_CHARS};
pub use error::{ClipboardError, ParseError, StorageError, ValidationError};
pub use query::{FilterSelector, Page};
pub use settings::Settings;
pub use stats::HistoryStats;
pub use tags::TagCatalog;
