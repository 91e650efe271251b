//! The parsed plan value type shared by both parsing paths.
//!
//! [`ParsedPlan`] is a plain value: it lives only until the next parse call
//! and owns nothing beyond its strings. Both the structured and freeform
//! parsers populate it through [`ParsedPlan::insert_item`], which enforces
//! the trim / non-empty / case-insensitive-dedup rules in one place.

use crate::category::Category;
use serde::Serialize;
use std::collections::HashMap;

/// What happened to a candidate item string on insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// First occurrence — appended to the category's item list.
    Accepted,
    /// Case-insensitive repeat — recorded in `duplicates`, not in `items`.
    Duplicate,
    /// Empty after trimming — dropped without a trace.
    Discarded,
}

/// A category→items mapping recovered from model text, plus diagnostics.
///
/// Invariants:
/// - every string in `items` is unique (case-insensitive) within its category,
///   trimmed, and non-empty; insertion order is preserved
/// - `duplicates` accounts for every string that was seen but excluded as a
///   case-insensitive repeat, in the order the repeats were dropped
/// - `extra_categories` holds unrecognized JSON keys from the structured path;
///   the freeform path never populates it
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedPlan {
    /// Accepted items per category. Absent key means zero items.
    pub items: HashMap<Category, Vec<String>>,
    /// Headings/keys that didn't match any known category (diagnostics only).
    pub extra_categories: Vec<String>,
    /// Case-insensitive repeats that were dropped, per category.
    pub duplicates: HashMap<Category, Vec<String>>,
}

impl ParsedPlan {
    /// Items for a category, or the empty slice if absent.
    pub fn items_for(&self, category: Category) -> &[String] {
        self.items.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of accepted items for a category (0 if absent).
    pub fn count(&self, category: Category) -> usize {
        self.items_for(category).len()
    }

    /// Dropped duplicates for a category, or the empty slice if absent.
    pub fn duplicates_for(&self, category: Category) -> &[String] {
        self.duplicates
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Insert a candidate item string into a category.
    ///
    /// Trims the candidate; empty strings are discarded. A candidate that is a
    /// case-insensitive repeat of an already-accepted item in the same
    /// category is appended to `duplicates` instead of `items`. The first
    /// occurrence keeps its original casing.
    pub fn insert_item(&mut self, category: Category, raw: &str) -> Insertion {
        let candidate = raw.trim();
        if candidate.is_empty() {
            return Insertion::Discarded;
        }
        let key = candidate.to_lowercase();
        let existing = self.items.entry(category).or_default();
        if existing.iter().any(|s| s.to_lowercase() == key) {
            self.duplicates
                .entry(category)
                .or_default()
                .push(candidate.to_string());
            return Insertion::Duplicate;
        }
        existing.push(candidate.to_string());
        Insertion::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_trims_and_accepts() {
        let mut plan = ParsedPlan::default();
        assert_eq!(plan.insert_item(Category::Warmup, "  Jog  "), Insertion::Accepted);
        assert_eq!(plan.items_for(Category::Warmup), &["Jog".to_string()]);
    }

    #[test]
    fn insert_discards_empty() {
        let mut plan = ParsedPlan::default();
        assert_eq!(plan.insert_item(Category::Core, "   "), Insertion::Discarded);
        assert_eq!(plan.count(Category::Core), 0);
        assert!(plan.duplicates.is_empty());
    }

    #[test]
    fn insert_records_case_insensitive_duplicates() {
        let mut plan = ParsedPlan::default();
        plan.insert_item(Category::Warmup, "Jog");
        assert_eq!(plan.insert_item(Category::Warmup, "jog"), Insertion::Duplicate);
        assert_eq!(plan.insert_item(Category::Warmup, "JOG"), Insertion::Duplicate);
        // First occurrence keeps its casing; repeats land in duplicates.
        assert_eq!(plan.items_for(Category::Warmup), &["Jog".to_string()]);
        assert_eq!(
            plan.duplicates_for(Category::Warmup),
            &["jog".to_string(), "JOG".to_string()]
        );
    }

    #[test]
    fn dedup_is_per_category() {
        let mut plan = ParsedPlan::default();
        plan.insert_item(Category::Warmup, "Plank");
        assert_eq!(plan.insert_item(Category::Core, "Plank"), Insertion::Accepted);
        assert!(plan.duplicates.is_empty());
    }

    #[test]
    fn repeated_n_times_yields_one_item_and_n_minus_one_duplicates() {
        let mut plan = ParsedPlan::default();
        for _ in 0..4 {
            plan.insert_item(Category::Cardio, "Rowing");
        }
        assert_eq!(plan.count(Category::Cardio), 1);
        assert_eq!(plan.duplicates_for(Category::Cardio).len(), 3);
    }

    #[test]
    fn absent_category_reads_as_empty() {
        let plan = ParsedPlan::default();
        assert!(plan.items_for(Category::Strength).is_empty());
        assert_eq!(plan.count(Category::Strength), 0);
        assert!(plan.duplicates_for(Category::Strength).is_empty());
    }
}
