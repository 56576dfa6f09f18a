//! Clipboard history entries.
mod order;
mod record;

pub use order::{
    canonical_cmp, enforce_capacity, next_free_timestamp, sort_canonical,
    sort_pinned_oldest_first, sweep_expired, MS_PER_DAY,
};
pub use record::{migrate_records, EntryRecord, Migrated};

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classify::classify;
use crate::error::ValidationError;

/// Upper bound on entry text, counted in characters.
pub const MAX_TEXT_CHARS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Url,
    Email,
    Phone,
    Code,
    Text,
}

impl ContentType {
    pub const ALL: [ContentType; 5] = [
        ContentType::Url,
        ContentType::Email,
        ContentType::Phone,
        ContentType::Code,
        ContentType::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Url => "url",
            ContentType::Email => "email",
            ContentType::Phone => "phone",
            ContentType::Code => "code",
            ContentType::Text => "text",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// One saved clipboard snippet. `text` is the dedup key, `timestamp` the
/// handle used by every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub text: String,
    pub timestamp: i64,
    pub favorite: bool,
    pub pinned: bool,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub tags: BTreeSet<String>,
}

impl Entry {
    /// Builds a validated, classified entry with no flags or tags.
    pub fn new(text: impl Into<String>, timestamp: i64) -> Result<Self, ValidationError> {
        let text = text.into();
        validate_text(&text)?;
        let content_type = classify(&text);
        Ok(Self {
            text,
            timestamp,
            favorite: false,
            pinned: false,
            content_type,
            tags: BTreeSet::new(),
        })
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Rejects empty (whitespace-only) text and text over [`MAX_TEXT_CHARS`].
pub fn validate_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }
    let len = text.chars().count();
    if len > MAX_TEXT_CHARS {
        return Err(ValidationError::TextTooLong {
            len,
            max: MAX_TEXT_CHARS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_classified() {
        let entry = Entry::new("https://example.com", 10).unwrap();
        assert_eq!(entry.content_type, ContentType::Url);
        assert!(!entry.favorite);
        assert!(!entry.pinned);
        assert!(entry.tags.is_empty());
    }

    #[test]
    fn test_validate_text_bounds() {
        assert_eq!(validate_text("  "), Err(ValidationError::EmptyText));
        assert!(validate_text(&"a".repeat(MAX_TEXT_CHARS)).is_ok());
        assert_eq!(
            validate_text(&"a".repeat(MAX_TEXT_CHARS + 1)),
            Err(ValidationError::TextTooLong {
                len: MAX_TEXT_CHARS + 1,
                max: MAX_TEXT_CHARS
            })
        );
    }

    #[test]
    fn test_text_limit_counts_chars_not_bytes() {
        let text = "é".repeat(MAX_TEXT_CHARS);
        assert!(text.len() > MAX_TEXT_CHARS);
        assert!(validate_text(&text).is_ok());
    }

    #[test]
    fn test_entry_serializes_with_type_key() {
        let entry = Entry::new("hello", 1).unwrap().with_tags(["work"]);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["tags"], serde_json::json!(["work"]));
        assert_eq!(json["favorite"], false);
    }

    #[test]
    fn test_content_type_from_str() {
        assert_eq!("URL".parse::<ContentType>(), Ok(ContentType::Url));
        assert_eq!("code".parse::<ContentType>(), Ok(ContentType::Code));
        assert!("image".parse::<ContentType>().is_err());
    }
}
