//! Loosely-typed stored records and their one-shot migration into [`Entry`].
//!
//! Stored history has no schema version, so every field except `text` may be
//! missing or stale. Migration fills the gaps once, at read time.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::Value;

use super::{validate_text, ContentType, Entry};
use crate::classify::classify;
use crate::error::ValidationError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryRecord {
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default)]
    pub favorite: Option<bool>,
    #[serde(default)]
    pub pinned: Option<bool>,
    #[serde(default, rename = "type")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl EntryRecord {
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        if !value.is_object() {
            return Err(ValidationError::WrongShape(type_name(&value).to_string()));
        }
        serde_json::from_value(value).map_err(|e| ValidationError::WrongShape(e.to_string()))
    }

    /// Produces a strongly-typed entry. `fresh_timestamp` is only called when
    /// the record carries no usable timestamp.
    pub fn into_entry(
        self,
        fresh_timestamp: impl FnOnce() -> i64,
    ) -> Result<Entry, ValidationError> {
        let text = match self.text {
            Some(Value::String(text)) => text,
            Some(other) => return Err(ValidationError::WrongShape(type_name(&other).to_string())),
            None => return Err(ValidationError::MissingText),
        };
        validate_text(&text)?;

        let timestamp = self
            .timestamp
            .as_ref()
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f.round() as i64)))
            .unwrap_or_else(fresh_timestamp);

        let content_type = self
            .content_type
            .as_deref()
            .and_then(|t| t.parse::<ContentType>().ok())
            .unwrap_or_else(|| classify(&text));

        let tags: BTreeSet<String> = self
            .tags
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        Ok(Entry {
            text,
            timestamp,
            favorite: self.favorite.unwrap_or(false),
            pinned: self.pinned.unwrap_or(false),
            content_type,
            tags,
        })
    }
}

/// Outcome of migrating a batch of raw records.
#[derive(Debug, Default)]
pub struct Migrated {
    pub entries: Vec<Entry>,
    /// Index into the input batch and the reason the record was dropped.
    pub rejected: Vec<(usize, ValidationError)>,
    /// How many entries were given a fresh timestamp.
    pub fresh_timestamps: usize,
}

impl Migrated {
    /// True when some entry got a fresh timestamp or some record was dropped.
    pub fn needs_rewrite(&self) -> bool {
        self.fresh_timestamps > 0 || !self.rejected.is_empty()
    }
}

pub fn migrate_records(records: Vec<Value>, mut fresh_timestamp: impl FnMut() -> i64) -> Migrated {
    let mut migrated = Migrated::default();
    let mut fresh = 0;
    for (index, value) in records.into_iter().enumerate() {
        let converted = EntryRecord::from_value(value).and_then(|r| {
            r.into_entry(|| {
                fresh += 1;
                fresh_timestamp()
            })
        });
        match converted {
            Ok(entry) => migrated.entries.push(entry),
            Err(e) => migrated.rejected.push((index, e)),
        }
    }
    migrated.fresh_timestamps = fresh;
    migrated
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_are_defaulted() {
        let migrated = migrate_records(vec![json!({ "text": "plain words", "timestamp": 42 })], || 0);
        let entry = &migrated.entries[0];
        assert_eq!(entry.timestamp, 42);
        assert!(!entry.favorite);
        assert!(!entry.pinned);
        assert_eq!(entry.content_type, ContentType::Text);
        assert!(entry.tags.is_empty());
    }

    #[test]
    fn test_unknown_type_is_reclassified() {
        let migrated = migrate_records(
            vec![json!({ "text": "a@b.io", "timestamp": 1, "type": "image" })],
            || 0,
        );
        assert_eq!(migrated.entries[0].content_type, ContentType::Email);
    }

    #[test]
    fn test_stored_type_is_kept() {
        let migrated = migrate_records(
            vec![json!({ "text": "a@b.io", "timestamp": 1, "type": "text" })],
            || 0,
        );
        assert_eq!(migrated.entries[0].content_type, ContentType::Text);
    }

    #[test]
    fn test_missing_timestamp_uses_fresh_values() {
        let mut next = 100;
        let migrated = migrate_records(
            vec![json!({ "text": "one" }), json!({ "text": "two" })],
            || {
                next += 1;
                next
            },
        );
        let stamps: Vec<i64> = migrated.entries.iter().map(|e| e.timestamp).collect();
        assert_eq!(stamps, vec![101, 102]);
        assert_eq!(migrated.fresh_timestamps, 2);
        assert!(migrated.needs_rewrite());
    }

    #[test]
    fn test_clean_batch_needs_no_rewrite() {
        let migrated = migrate_records(
            vec![json!({ "text": "a", "timestamp": 1 }), json!({ "text": "b", "timestamp": 2 })],
            || 0,
        );
        assert_eq!(migrated.fresh_timestamps, 0);
        assert!(!migrated.needs_rewrite());
    }

    #[test]
    fn test_invalid_records_are_rejected_individually() {
        let migrated = migrate_records(
            vec![
                json!({ "text": "" }),
                json!("bare string"),
                json!({ "timestamp": 3 }),
                json!({ "text": 12 }),
                json!({ "text": "kept", "timestamp": 5, "favorite": true }),
            ],
            || 0,
        );
        assert_eq!(migrated.entries.len(), 1);
        assert!(migrated.entries[0].favorite);
        let reasons: Vec<usize> = migrated.rejected.iter().map(|(i, _)| *i).collect();
        assert_eq!(reasons, vec![0, 1, 2, 3]);
        assert_eq!(migrated.rejected[0].1, ValidationError::EmptyText);
        assert_eq!(migrated.rejected[2].1, ValidationError::MissingText);
        assert!(migrated.needs_rewrite());
    }

    #[test]
    fn test_float_timestamp_is_rounded() {
        let migrated = migrate_records(vec![json!({ "text": "x", "timestamp": 10.6 })], || 0);
        assert_eq!(migrated.entries[0].timestamp, 11);
    }
}
