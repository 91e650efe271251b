//! Structured (embedded-JSON) parsing path.
//!
//! Models asked for JSON usually emit one object, often wrapped in prose or
//! fences. This path locates the single brace-delimited candidate with a
//! greedy outermost scan and decodes it. Any failure returns `None` so the
//! caller can fall back to the freeform parser — nothing on this path is an
//! error.

use crate::category::Category;
use crate::plan::ParsedPlan;
use serde_json::Value;

/// Try to recover a plan from an embedded JSON object.
///
/// Returns `None` when no brace-delimited substring exists or the candidate
/// does not decode to a JSON object. Only the first (greedy, outermost)
/// candidate is attempted; a decode failure is not retried against later
/// brace pairs.
pub fn try_structured(text: &str) -> Option<ParsedPlan> {
    let candidate = find_braced(text)?;
    let value: Value = serde_json::from_str(candidate).ok()?;
    let obj = value.as_object()?;

    let mut plan = ParsedPlan::default();
    for (key, value) in obj {
        match Category::recognize(key) {
            Some(category) => {
                // The key existed, so the category is present even when its
                // list decodes to nothing.
                plan.items.entry(category).or_default();
                for name in extract_names(value) {
                    plan.insert_item(category, &name);
                }
            }
            None => plan.extra_categories.push(key.clone()),
        }
    }
    Some(plan)
}

/// Greedy outermost-braces scan: first `{` through last `}`.
fn find_braced(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Accept arrays of plain strings or arrays of objects with a string `name`
/// field. Any other shape yields an empty list, not an error.
fn extract_names(value: &Value) -> Vec<String> {
    let Some(arr) = value.as_array() else {
        return Vec::new();
    };
    arr.iter()
        .filter_map(|elt| match elt {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map
                .get("name")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            _ => None,
        })
        .collect()
}
