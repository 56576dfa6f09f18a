use std::collections::BTreeMap;

use serde::Serialize;

use crate::entry::{ContentType, Entry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub total_items: usize,
    pub favorite_items: usize,
    /// Size of the collection as serialized JSON.
    pub total_size_bytes: usize,
    pub usage_percentage: u32,
    pub type_breakdown: BTreeMap<ContentType, usize>,
}

impl HistoryStats {
    pub fn compute(entries: &[Entry], max_items: usize) -> serde_json::Result<Self> {
        let total_size_bytes = serde_json::to_vec(entries)?.len();
        let mut type_breakdown = BTreeMap::new();
        for entry in entries {
            *type_breakdown.entry(entry.content_type).or_insert(0) += 1;
        }
        let usage_percentage = if max_items == 0 {
            0
        } else {
            (entries.len() as f64 / max_items as f64 * 100.0).round() as u32
        };
        Ok(Self {
            total_items: entries.len(),
            favorite_items: entries.iter().filter(|e| e.favorite).count(),
            total_size_bytes,
            usage_percentage,
            type_breakdown,
        })
    }
}
