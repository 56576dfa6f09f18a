use std::cmp::Ordering;
use std::collections::HashSet;

use super::Entry;

pub const MS_PER_DAY: i64 = 86_400_000;

/// Pinned first, then newest first.
pub fn canonical_cmp(a: &Entry, b: &Entry) -> Ordering {
    b.pinned
        .cmp(&a.pinned)
        .then_with(|| b.timestamp.cmp(&a.timestamp))
}

/// Stable, so equal timestamps keep insertion order.
pub fn sort_canonical(entries: &mut [Entry]) {
    entries.sort_by(canonical_cmp);
}

/// Pinned first, then oldest first.
pub fn sort_pinned_oldest_first(entries: &mut [Entry]) {
    entries.sort_by(|a, b| {
        b.pinned
            .cmp(&a.pinned)
            .then_with(|| a.timestamp.cmp(&b.timestamp))
    });
}

/// Trims a collection to `max_items`, dropping the oldest unpinned entries.
///
/// Returns the surviving entries in canonical order and the number evicted.
/// When pinned entries alone exceed the limit, only the newest `max_items`
/// pinned entries survive.
pub fn enforce_capacity(mut entries: Vec<Entry>, max_items: usize) -> (Vec<Entry>, usize) {
    sort_canonical(&mut entries);
    let before = entries.len();
    if before <= max_items {
        return (entries, 0);
    }

    let (mut pinned, unpinned): (Vec<Entry>, Vec<Entry>) =
        entries.into_iter().partition(|e| e.pinned);
    pinned.truncate(max_items);
    let room = max_items - pinned.len();
    pinned.extend(unpinned.into_iter().take(room));

    let evicted = before - pinned.len();
    (pinned, evicted)
}

/// Drops entries older than `days` relative to `now_ms`, sparing pinned and
/// favorite entries. Returns survivors (order preserved) and the removed count.
pub fn sweep_expired(entries: Vec<Entry>, now_ms: i64, days: u32) -> (Vec<Entry>, usize) {
    let cutoff = now_ms.saturating_sub(i64::from(days).saturating_mul(MS_PER_DAY));
    let before = entries.len();
    let kept: Vec<Entry> = entries
        .into_iter()
        .filter(|e| e.pinned || e.favorite || e.timestamp >= cutoff)
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}

/// First timestamp at or after `wanted` that none of `entries` uses.
pub fn next_free_timestamp<'a>(
    entries: impl IntoIterator<Item = &'a Entry>,
    wanted: i64,
) -> i64 {
    let taken: HashSet<i64> = entries.into_iter().map(|e| e.timestamp).collect();
    let mut ts = wanted;
    while taken.contains(&ts) {
        ts += 1;
    }
    ts
}
