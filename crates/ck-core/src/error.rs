//! Error taxonomy shared by every layer.
//!
//! Storage failures are caught at the store boundary and turned into soft
//! results; clipboard failures propagate to the caller; validation failures
//! drop the offending candidate.

use thiserror::Error;

/// Backing key-value store read/write failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("failed to read `{key}`: {message}")]
    Read { key: String, message: String },

    #[error("failed to write `{key}`: {message}")]
    Write { key: String, message: String },

    #[error("stored value under `{key}` is corrupt: {message}")]
    Corrupt { key: String, message: String },
}

impl StorageError {
    pub fn read(key: &str, message: impl Into<String>) -> Self {
        Self::Read {
            key: key.to_string(),
            message: message.into(),
        }
    }

    pub fn write(key: &str, message: impl Into<String>) -> Self {
        Self::Write {
            key: key.to_string(),
            message: message.into(),
        }
    }

    pub fn corrupt(key: &str, message: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// A candidate entry that cannot become an [`Entry`](crate::entry::Entry).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("entry text is empty")]
    EmptyText,

    #[error("entry text has {len} characters, limit is {max}")]
    TextTooLong { len: usize, max: usize },

    #[error("record has no text field")]
    MissingText,

    #[error("record is not an object: {0}")]
    WrongShape(String),

    #[error("setting `{0}` must be at least 1")]
    InvalidSetting(&'static str),
}

/// Clipboard access failure reported by the host environment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard access denied: {0}")]
    PermissionDenied(String),

    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Import payload that yields no candidates at all.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("import data is valid JSON but neither an array nor an object with `clipboardHistory`")]
    UnsupportedShape,

    #[error("import data contains no entries")]
    Empty,
}
