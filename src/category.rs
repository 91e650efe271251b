//! The closed set of exercise categories.
//!
//! Every plan is organized into exactly these four categories. Recognition
//! accepts a small set of surface-form synonyms ("warm-up", "warm up") but
//! output always uses the canonical lowercase name.

use serde::Serialize;

/// One of the four fixed exercise categories.
///
/// The set is closed — there is no dynamic extension. Headings or JSON keys
/// that don't resolve to one of these are diagnostics, never new categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Warmup,
    Strength,
    Cardio,
    Core,
}

impl Category {
    /// All categories in validation order. The order is significant: the
    /// validator emits per-category issues in exactly this sequence.
    pub const ALL: [Category; 4] = [
        Category::Warmup,
        Category::Strength,
        Category::Cardio,
        Category::Core,
    ];

    /// Canonical lowercase name, used in prompts, counts, and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Warmup => "warmup",
            Category::Strength => "strength",
            Category::Cardio => "cardio",
            Category::Core => "core",
        }
    }

    /// Resolve a raw heading or JSON key to a category.
    ///
    /// Lowercases, trims, and normalizes hyphens and interior whitespace away
    /// before comparison, so "Warm-Up", "warm up", and "WARMUPS" all resolve
    /// to [`Category::Warmup`]. Unknown input returns `None` — callers route
    /// non-matches into diagnostics.
    pub fn recognize(raw: &str) -> Option<Category> {
        let normalized: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        match normalized.as_str() {
            "warmup" | "warmups" => Some(Category::Warmup),
            "strength" => Some(Category::Strength),
            "cardio" => Some(Category::Cardio),
            "core" => Some(Category::Core),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
