//! The filter/search pipeline the popup renders against.

use std::fmt;

use serde::Serialize;

use crate::entry::{sort_canonical, sort_pinned_oldest_first, ContentType, Entry};

/// Which subset of the history to show, and in what order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterSelector {
    #[default]
    All,
    Favorites,
    Recent,
    Oldest,
    Urls,
    Code,
    Tag(String),
}

impl From<&str> for FilterSelector {
    /// Unknown selectors mean no extra filtering.
    fn from(value: &str) -> Self {
        if let Some(tag) = value.strip_prefix("tag:") {
            return FilterSelector::Tag(tag.to_string());
        }
        match value {
            "favorites" => FilterSelector::Favorites,
            "recent" => FilterSelector::Recent,
            "oldest" => FilterSelector::Oldest,
            "urls" => FilterSelector::Urls,
            "code" => FilterSelector::Code,
            _ => FilterSelector::All,
        }
    }
}

impl fmt::Display for FilterSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterSelector::All => f.write_str("all"),
            FilterSelector::Favorites => f.write_str("favorites"),
            FilterSelector::Recent => f.write_str("recent"),
            FilterSelector::Oldest => f.write_str("oldest"),
            FilterSelector::Urls => f.write_str("urls"),
            FilterSelector::Code => f.write_str("code"),
            FilterSelector::Tag(tag) => write!(f, "tag:{tag}"),
        }
    }
}

/// Produces the ordered, filtered view of `entries`. Never mutates the input.
pub fn view(entries: &[Entry], search: &str, filter: &FilterSelector) -> Vec<Entry> {
    let needle = search.to_lowercase();
    let searching = !search.trim().is_empty();
    let mut out: Vec<Entry> = entries
        .iter()
        .filter(|e| !searching || e.text.to_lowercase().contains(&needle))
        .filter(|e| match filter {
            FilterSelector::Tag(tag) => e.has_tag(tag),
            FilterSelector::Favorites => e.favorite,
            FilterSelector::Urls => e.content_type == ContentType::Url,
            FilterSelector::Code => e.content_type == ContentType::Code,
            FilterSelector::All | FilterSelector::Recent | FilterSelector::Oldest => true,
        })
        .cloned()
        .collect();

    match filter {
        FilterSelector::Oldest => sort_pinned_oldest_first(&mut out),
        _ => sort_canonical(&mut out),
    }
    out
}

/// One page of a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub items: Vec<Entry>,
    /// 1-based, clamped into `1..=total_pages`.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

pub fn paginate(entries: Vec<Entry>, page: usize, per_page: usize) -> Page {
    let per_page = per_page.max(1);
    let total_items = entries.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);
    let items = entries
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();
    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str, ts: i64) -> Entry {
        Entry::new(text, ts).unwrap()
    }

    fn texts(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.text.as_str()).collect()
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry("Hello World", 1),
            entry("https://rust-lang.org", 2).with_tags(["docs"]),
            entry("fn main() {}", 3).with_favorite(true),
            entry("say hello again", 4).with_pinned(true),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let out = view(&sample(), "HELLO", &FilterSelector::All);
        assert_eq!(texts(&out), vec!["say hello again", "Hello World"]);
    }

    #[test]
    fn test_search_keeps_surrounding_spaces() {
        let entries = vec![entry("foobar", 1), entry("foo bar", 2)];
        assert_eq!(texts(&view(&entries, "foo ", &FilterSelector::All)), vec!["foo bar"]);
        assert_eq!(view(&entries, "   ", &FilterSelector::All).len(), 2);
    }

    #[test]
    fn test_favorites_returns_only_favorites() {
        let out = view(&sample(), "", &FilterSelector::Favorites);
        assert_eq!(texts(&out), vec!["fn main() {}"]);
    }

    #[test]
    fn test_tag_filter() {
        let out = view(&sample(), "", &"tag:docs".into());
        assert_eq!(texts(&out), vec!["https://rust-lang.org"]);
        assert!(view(&sample(), "", &"tag:none".into()).is_empty());
    }

    #[test]
    fn test_type_filters() {
        assert_eq!(
            texts(&view(&sample(), "", &FilterSelector::Urls)),
            vec!["https://rust-lang.org"]
        );
        assert_eq!(
            texts(&view(&sample(), "", &FilterSelector::Code)),
            vec!["fn main() {}"]
        );
    }

    #[test]
    fn test_recent_and_oldest_keep_pinned_first() {
        assert_eq!(
            texts(&view(&sample(), "", &FilterSelector::Recent)),
            vec!["say hello again", "fn main() {}", "https://rust-lang.org", "Hello World"]
        );
        assert_eq!(
            texts(&view(&sample(), "", &FilterSelector::Oldest)),
            vec!["say hello again", "Hello World", "https://rust-lang.org", "fn main() {}"]
        );
    }

    #[test]
    fn test_view_does_not_mutate_input() {
        let input = sample();
        let snapshot = input.clone();
        let _ = view(&input, "", &FilterSelector::Oldest);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn test_default_view_over_filtered_view_is_noop() {
        let entries = sample();
        for filter in ["", "favorites", "recent", "urls", "code", "tag:docs"] {
            let filter = FilterSelector::from(filter);
            let once = view(&entries, "o", &filter);
            let twice = view(&once, "", &FilterSelector::All);
            assert_eq!(once, twice, "filter {filter}");
        }
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!(FilterSelector::from("all"), FilterSelector::All);
        assert_eq!(FilterSelector::from("bogus"), FilterSelector::All);
        assert_eq!(
            FilterSelector::from("tag:work"),
            FilterSelector::Tag("work".into())
        );
        assert_eq!(FilterSelector::Tag("x".into()).to_string(), "tag:x");
    }

    #[test]
    fn test_paginate_clamps_page() {
        let entries: Vec<Entry> = (0..5).map(|i| entry(&format!("e{i}"), i)).collect();
        let page = paginate(entries.clone(), 2, 2);
        assert_eq!(texts(&page.items), vec!["e2", "e3"]);
        assert_eq!(page.total_pages, 3);

        let last = paginate(entries.clone(), 99, 2);
        assert_eq!(last.page, 3);
        assert_eq!(texts(&last.items), vec!["e4"]);

        let empty = paginate(Vec::new(), 0, 10);
        assert_eq!(empty.page, 1);
        assert_eq!(empty.total_pages, 1);
        assert!(empty.items.is_empty());
    }
}
