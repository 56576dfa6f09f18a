//! Known tag names and their color assignment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fixed color palette, assigned cyclically to new tags.
pub const TAG_PALETTE: [&str; 10] = [
    "#ef4444", "#f97316", "#eab308", "#22c55e", "#14b8a6", "#3b82f6", "#6366f1", "#a855f7",
    "#ec4899", "#64748b",
];

/// Global tag set plus the stable name -> color mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCatalog {
    pub tags: Vec<String>,
    pub colors: BTreeMap<String, String>,
}

impl TagCatalog {
    pub fn new(tags: Vec<String>, colors: BTreeMap<String, String>) -> Self {
        Self { tags, colors }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn color_of(&self, tag: &str) -> Option<&str> {
        self.colors.get(tag).map(String::as_str)
    }

    /// Adds every tag not yet known and returns the ones that were new.
    ///
    /// A new tag takes palette slot `colors.len() % 10`. Tags that already
    /// have a color keep it.
    pub fn register<I, S>(&mut self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() || self.contains(name) {
                continue;
            }
            self.tags.push(name.to_string());
            if !self.colors.contains_key(name) {
                let slot = self.colors.len() % TAG_PALETTE.len();
                self.colors
                    .insert(name.to_string(), TAG_PALETTE[slot].to_string());
            }
            added.push(name.to_string());
        }
        added
    }

    /// Forgets a tag and its color. Returns whether it was known.
    pub fn forget(&mut self, name: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != name);
        let had_color = self.colors.remove(name).is_some();
        before != self.tags.len() || had_color
    }
}

/// Splits user input like `"work, urgent ,,todo"` into clean tag names.
pub fn parse_tag_list(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_assigns_palette_in_order() {
        let mut catalog = TagCatalog::default();
        let added = catalog.register(["work", "home"]);
        assert_eq!(added, vec!["work", "home"]);
        assert_eq!(catalog.color_of("work"), Some(TAG_PALETTE[0]));
        assert_eq!(catalog.color_of("home"), Some(TAG_PALETTE[1]));
    }

    #[test]
    fn test_register_skips_known_and_blank() {
        let mut catalog = TagCatalog::default();
        catalog.register(["work"]);
        let added = catalog.register(["work", "  ", "work", "new"]);
        assert_eq!(added, vec!["new"]);
        assert_eq!(catalog.tags, vec!["work", "new"]);
        assert_eq!(catalog.color_of("work"), Some(TAG_PALETTE[0]));
    }

    #[test]
    fn test_palette_cycles_after_ten() {
        let mut catalog = TagCatalog::default();
        let names: Vec<String> = (0..11).map(|i| format!("t{i}")).collect();
        catalog.register(&names);
        assert_eq!(catalog.color_of("t10"), Some(TAG_PALETTE[0]));
    }

    #[test]
    fn test_readded_tag_takes_next_slot() {
        let mut catalog = TagCatalog::default();
        catalog.register(["a", "b", "c"]);
        assert!(catalog.forget("a"));
        catalog.register(["a"]);
        // two colors remain after forgetting, so `a` lands on slot 2
        assert_eq!(catalog.color_of("a"), Some(TAG_PALETTE[2]));
        assert!(!catalog.forget("missing"));
    }

    #[test]
    fn test_parse_tag_list() {
        assert_eq!(
            parse_tag_list("work, urgent ,,work,todo "),
            vec!["work", "urgent", "todo"]
        );
        assert!(parse_tag_list(" , ").is_empty());
    }
}
