//! # Tag Table
//!
//! The in-memory mirror of one file's tag situation: every tag the database
//! knows about, flagged with whether it is currently applied to the file and
//! with what value.
//!
//! Rows live in a map keyed by tag name with a separate insertion-order list
//! for display, so lookups are O(1) while the listing keeps the order tags
//! arrived in. Rows are never removed: an untagged row stays visible as a
//! candidate for re-tagging.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One visible row: applied or not, plus the value it carries when applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRow {
    pub tagged: bool,
    pub value: String,
}

/// Display ordering for the tag list. Cycled by the user at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// The order rows were first inserted (file tags, then global tags).
    #[default]
    Insertion,
    /// Alphabetical by tag name.
    Name,
    /// Applied tags first, insertion order within each group.
    TaggedFirst,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            SortMode::Insertion => SortMode::Name,
            SortMode::Name => SortMode::TaggedFirst,
            SortMode::TaggedFirst => SortMode::Insertion,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Insertion => "insertion",
            SortMode::Name => "name",
            SortMode::TaggedFirst => "tagged first",
        }
    }
}

#[derive(Debug, Default)]
pub struct TagTable {
    rows: HashMap<String, TagRow>,
    order: Vec<String>,
}

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the startup table: one tagged row per `(name, value)` the file
    /// carries, then one untagged row for every other globally known tag.
    pub fn from_listings(all_tags: Vec<String>, file_tags: Vec<(String, String)>) -> Self {
        let mut table = Self::new();
        for (name, value) in file_tags {
            table.insert(name, TagRow { tagged: true, value });
        }
        for name in all_tags {
            if !table.rows.contains_key(&name) {
                table.insert(name, TagRow { tagged: false, value: String::new() });
            }
        }
        table
    }

    fn insert(&mut self, name: String, row: TagRow) {
        if self.rows.insert(name.clone(), row).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&TagRow> {
        self.rows.get(name)
    }

    pub fn is_tagged(&self, name: &str) -> bool {
        self.rows.get(name).is_some_and(|r| r.tagged)
    }

    /// Flip a row to tagged with no value, inserting it if the name is new.
    pub fn mark_tagged(&mut self, name: &str) {
        match self.rows.get_mut(name) {
            Some(row) => {
                row.tagged = true;
                row.value.clear();
            }
            None => self.insert(
                name.to_string(),
                TagRow { tagged: true, value: String::new() },
            ),
        }
    }

    /// Flip a row to untagged and drop its value. Unknown names are ignored.
    pub fn mark_untagged(&mut self, name: &str) {
        if let Some(row) = self.rows.get_mut(name) {
            row.tagged = false;
            row.value.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn tagged_count(&self) -> usize {
        self.rows.values().filter(|r| r.tagged).count()
    }

    /// Rows in the order `sort` dictates. Name and tagged-first sorts are
    /// stable over insertion order.
    pub fn display_rows(&self, sort: SortMode) -> Vec<(&str, &TagRow)> {
        let mut names: Vec<&str> = self.order.iter().map(String::as_str).collect();
        match sort {
            SortMode::Insertion => {}
            SortMode::Name => names.sort(),
            SortMode::TaggedFirst => {
                names.sort_by_key(|name| !self.is_tagged(name));
            }
        }
        names
            .into_iter()
            .map(|name| (name, &self.rows[name]))
            .collect()
    }

    /// Inline completion: the first row name (in insertion order) starting
    /// with `prefix`, matched case-insensitively. Exact matches and empty
    /// prefixes complete to nothing.
    pub fn complete(&self, prefix: &str) -> Option<&str> {
        if prefix.is_empty() {
            return None;
        }
        let lower = prefix.to_lowercase();
        self.order
            .iter()
            .map(String::as_str)
            .find(|name| name.len() > prefix.len() && name.to_lowercase().starts_with(&lower))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TagTable {
        TagTable::from_listings(
            vec!["a".to_string(), "b".to_string()],
            vec![("a".to_string(), "1".to_string())],
        )
    }

    #[test]
    fn startup_merge_marks_file_tags() {
        let table = sample();
        assert_eq!(
            table.get("a"),
            Some(&TagRow { tagged: true, value: "1".to_string() })
        );
        assert_eq!(
            table.get("b"),
            Some(&TagRow { tagged: false, value: String::new() })
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn startup_merge_never_duplicates_names() {
        let table = TagTable::from_listings(
            vec!["a".to_string(), "b".to_string(), "a".to_string()],
            vec![("a".to_string(), String::new())],
        );
        assert_eq!(table.len(), 2);
        assert!(table.is_tagged("a"));
    }

    #[test]
    fn file_tags_precede_global_tags_in_insertion_order() {
        let table = TagTable::from_listings(
            vec!["x".to_string(), "y".to_string()],
            vec![("y".to_string(), "2".to_string())],
        );
        let names: Vec<&str> = table
            .display_rows(SortMode::Insertion)
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(names, vec!["y", "x"]);
    }

    #[test]
    fn toggle_round_trip_restores_original_row() {
        let mut table = sample();
        table.mark_tagged("b");
        assert_eq!(
            table.get("b"),
            Some(&TagRow { tagged: true, value: String::new() })
        );
        table.mark_untagged("b");
        assert_eq!(
            table.get("b"),
            Some(&TagRow { tagged: false, value: String::new() })
        );
    }

    #[test]
    fn untagging_drops_the_value() {
        let mut table = sample();
        table.mark_untagged("a");
        assert_eq!(
            table.get("a"),
            Some(&TagRow { tagged: false, value: String::new() })
        );
    }

    #[test]
    fn mark_tagged_inserts_new_names_at_the_end() {
        let mut table = sample();
        table.mark_tagged("fresh");
        assert!(table.is_tagged("fresh"));
        let names: Vec<&str> = table
            .display_rows(SortMode::Insertion)
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(names, vec!["a", "b", "fresh"]);
    }

    #[test]
    fn sort_modes() {
        let mut table = TagTable::from_listings(
            vec!["zebra".to_string(), "ant".to_string()],
            vec![("mole".to_string(), String::new())],
        );
        table.mark_tagged("ant");

        let by_name: Vec<&str> = table
            .display_rows(SortMode::Name)
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(by_name, vec!["ant", "mole", "zebra"]);

        let tagged_first: Vec<&str> = table
            .display_rows(SortMode::TaggedFirst)
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(tagged_first, vec!["mole", "ant", "zebra"]);
    }

    #[test]
    fn sort_mode_cycles_through_all_three() {
        let mut mode = SortMode::Insertion;
        mode = mode.next();
        assert_eq!(mode, SortMode::Name);
        mode = mode.next();
        assert_eq!(mode, SortMode::TaggedFirst);
        mode = mode.next();
        assert_eq!(mode, SortMode::Insertion);
    }

    #[test]
    fn completion_prefers_insertion_order() {
        let table = TagTable::from_listings(
            vec!["beta".to_string(), "berry".to_string()],
            Vec::new(),
        );
        assert_eq!(table.complete("be"), Some("beta"));
        assert_eq!(table.complete("BE"), Some("beta"));
        assert_eq!(table.complete("beta"), None); // exact match, nothing to add
        assert_eq!(table.complete(""), None);
        assert_eq!(table.complete("x"), None);
    }

    #[test]
    fn tagged_count_tracks_mutations() {
        let mut table = sample();
        assert_eq!(table.tagged_count(), 1);
        table.mark_tagged("b");
        assert_eq!(table.tagged_count(), 2);
        table.mark_untagged("a");
        assert_eq!(table.tagged_count(), 1);
    }
}
