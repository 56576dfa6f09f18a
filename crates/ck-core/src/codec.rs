//! Text formats for exporting and importing history.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, TimeZone};
use serde_json::Value;

use crate::entry::{migrate_records, Entry};
use crate::error::{ParseError, ValidationError};

pub const CSV_HEADER: &str = "Text,Timestamp,Favorite,Type";
const FAVORITE_MARKER: &str = " ⭐";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Txt,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Txt),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unsupported export format: {other}")),
        }
    }
}

/// Renders `entries` in local time.
pub fn export(entries: &[Entry], format: ExportFormat) -> serde_json::Result<String> {
    export_in(entries, format, &Local)
}

/// Renders `entries`, formatting datetimes in `tz`.
pub fn export_in<Tz>(entries: &[Entry], format: ExportFormat, tz: &Tz) -> serde_json::Result<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let out = match format {
        ExportFormat::Txt => entries
            .iter()
            .map(|e| {
                format!(
                    "{} [{}]{}",
                    e.text,
                    format_datetime(e.timestamp, tz),
                    if e.favorite { FAVORITE_MARKER } else { "" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
        ExportFormat::Csv => {
            let mut lines = Vec::with_capacity(entries.len() + 1);
            lines.push(CSV_HEADER.to_string());
            lines.extend(entries.iter().map(|e| {
                format!(
                    "{},{},{},{}",
                    csv_quote(&e.text),
                    csv_quote(&format_datetime(e.timestamp, tz)),
                    e.favorite,
                    e.content_type
                )
            }));
            lines.join("\n")
        }
        ExportFormat::Json => serde_json::to_string_pretty(entries)?,
    };
    Ok(out)
}

pub fn format_datetime<Tz>(timestamp_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    tz.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format(DATETIME_FORMAT).to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Candidates parsed from an import payload, in input order.
#[derive(Debug, Default)]
pub struct ImportBatch {
    pub candidates: Vec<Entry>,
    pub rejected: Vec<(usize, ValidationError)>,
}

/// Parses an import payload.
///
/// JSON is tried first: a bare array, or an object whose `clipboardHistory`
/// is an array. Anything that is not JSON (or is a JSON scalar) is read as
/// plain text, one entry per non-blank line. Records without a timestamp get
/// unique ones counting up from `now_ms`.
pub fn import(raw: &str, now_ms: i64) -> Result<ImportBatch, ParseError> {
    let mut next = now_ms;
    let mut fresh_timestamp = move || {
        let ts = next;
        next += 1;
        ts
    };

    let batch = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(records)) => from_records(records, &mut fresh_timestamp),
        Ok(Value::Object(mut object)) => match object.remove("clipboardHistory") {
            Some(Value::Array(records)) => from_records(records, &mut fresh_timestamp),
            _ => return Err(ParseError::UnsupportedShape),
        },
        _ => from_lines(raw, &mut fresh_timestamp),
    };

    if batch.candidates.is_empty() && batch.rejected.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(batch)
}

fn from_records(records: Vec<Value>, fresh_timestamp: &mut impl FnMut() -> i64) -> ImportBatch {
    let migrated = migrate_records(records, fresh_timestamp);
    ImportBatch {
        candidates: migrated.entries,
        rejected: migrated.rejected,
    }
}

fn from_lines(raw: &str, fresh_timestamp: &mut impl FnMut() -> i64) -> ImportBatch {
    let mut batch = ImportBatch::default();
    for (index, line) in raw.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
        match Entry::new(line, fresh_timestamp()) {
            Ok(entry) => batch.candidates.push(entry),
            Err(e) => batch.rejected.push((index, e)),
        }
    }
    batch
}
