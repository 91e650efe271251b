//! Freeform (heading + bullet) parsing path.
//!
//! Fallback for model output that never produced a decodable JSON object:
//! markdown-ish headings, bulleted/numbered/plain lists, control tokens, and
//! blank-line noise. This path never fails — the worst case is an empty plan.
//!
//! Unlike the structured path, unrecognized headings are simply ignored, not
//! recorded in `extra_categories`. That asymmetry is deliberate: a prose line
//! that happens to look like a heading is far more common here than an
//! invented JSON key, and flagging every one would drown the diagnostics.

use crate::category::Category;
use crate::parser::patterns;
use crate::plan::{Insertion, ParsedPlan};

/// Parse headings and list items out of unstructured text.
///
/// Line-oriented state machine with one active-category slot. Blank-line
/// policy: immediately after a heading one blank line is tolerated (a second
/// consecutive blank closes the section); once the section has captured at
/// least one item — duplicates included — a single blank closes it. Lines
/// outside any active section are treated as prose and ignored.
pub fn parse_freeform(text: &str) -> ParsedPlan {
    let mut plan = ParsedPlan::default();
    let mut current: Option<Category> = None;
    let mut blank_streak: u32 = 0;
    let mut section_items: usize = 0;

    for raw_line in text.lines() {
        let trimmed = raw_line.trim();

        // Control tokens and fences contribute nothing, not even to blanks.
        if patterns::is_meta_or_fence(trimmed) {
            continue;
        }

        if trimmed.is_empty() {
            if current.is_some() {
                if section_items > 0 {
                    current = None;
                    blank_streak = 0;
                } else {
                    blank_streak += 1;
                    if blank_streak >= 2 {
                        current = None;
                    }
                }
            }
            continue;
        }
        blank_streak = 0;

        if patterns::is_divider(trimmed) {
            continue;
        }

        if let Some(category) = patterns::heading_category(trimmed) {
            current = Some(category);
            section_items = 0;
            continue;
        }

        let Some(category) = current else {
            continue;
        };

        let candidate = patterns::bullet_candidate(raw_line).unwrap_or(trimmed);
        let candidate = patterns::strip_emphasis(candidate);
        if candidate.is_empty() || patterns::is_meta_or_fence(candidate) {
            continue;
        }
        match plan.insert_item(category, candidate) {
            // Duplicates were still matched as item lines, so they count
            // toward the "has captured an item" blank-line rule.
            Insertion::Accepted | Insertion::Duplicate => section_items += 1,
            Insertion::Discarded => {}
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_list_formats_parse() {
        let text = "\
Warmup
1. Jog
2. Jumping Jacks
3. Arm Circles
4. High Knees
5. Leg Swings

Strength
- Squats
- Deadlift
- Bench Press
- Rows
- Overhead Press

Cardio
Rowing
Cycling
Running
Stairs
Jump Rope

Core
- Plank
- Crunches
- Bird Dog
- Dead Bug
- Side Plank";
        let plan = parse_freeform(text);
        for category in Category::ALL {
            assert_eq!(plan.count(category), 5, "category {}", category);
        }
        assert!(plan.extra_categories.is_empty());
        assert!(plan.duplicates.is_empty());
    }

    #[test]
    fn meta_token_after_heading_does_not_close_section() {
        let text = "\
Warmup
<end_of_turn>
1. Jog
2. Jumping Jacks
3. Arm Circles
4. High Knees
5. Leg Swings";
        let plan = parse_freeform(text);
        assert_eq!(plan.count(Category::Warmup), 5);
    }

    #[test]
    fn one_blank_after_heading_is_tolerated() {
        let text = "Cardio\n\nRowing\nCycling";
        let plan = parse_freeform(text);
        assert_eq!(plan.count(Category::Cardio), 2);
    }

    #[test]
    fn two_blanks_after_heading_close_the_section() {
        let text = "Cardio\n\n\nRowing";
        let plan = parse_freeform(text);
        assert_eq!(plan.count(Category::Cardio), 0);
    }

    #[test]
    fn single_blank_after_item_closes_the_section() {
        let text = "Cardio\nRowing\n\nCycling";
        let plan = parse_freeform(text);
        // "Cycling" falls outside the closed section and is prose.
        assert_eq!(plan.items_for(Category::Cardio), &["Rowing".to_string()]);
    }

    #[test]
    fn duplicate_counts_toward_blank_rule() {
        // Second "Jog" is a duplicate but still an item line, so the blank
        // after it closes the section.
        let text = "Warmup\nJog\njog\n\nStretch";
        let plan = parse_freeform(text);
        assert_eq!(plan.items_for(Category::Warmup), &["Jog".to_string()]);
        assert_eq!(plan.duplicates_for(Category::Warmup), &["jog".to_string()]);
    }

    #[test]
    fn dividers_are_ignored() {
        let text = "Strength\n=====\n- Squats\n---\n- Deadlift";
        let plan = parse_freeform(text);
        assert_eq!(
            plan.items_for(Category::Strength),
            &["Squats".to_string(), "Deadlift".to_string()]
        );
    }

    #[test]
    fn heading_anywhere_in_line_switches_section() {
        let text = "## Warmup Exercises:\n- Jog\nNow for Strength:\n- Squats";
        let plan = parse_freeform(text);
        assert_eq!(plan.items_for(Category::Warmup), &["Jog".to_string()]);
        assert_eq!(plan.items_for(Category::Strength), &["Squats".to_string()]);
    }

    #[test]
    fn prose_outside_sections_is_ignored() {
        let text = "Here is your plan for today.\nGood luck!\nWarmup\n- Jog";
        let plan = parse_freeform(text);
        assert_eq!(plan.items_for(Category::Warmup), &["Jog".to_string()]);
    }

    #[test]
    fn emphasis_markers_are_stripped() {
        let text = "Core\n- **Plank**\n- __Crunches__";
        let plan = parse_freeform(text);
        assert_eq!(
            plan.items_for(Category::Core),
            &["Plank".to_string(), "Crunches".to_string()]
        );
    }

    #[test]
    fn unrecognized_headings_never_populate_extra_categories() {
        let text = "Mobility\n- Hip Circles\nWarmup\n- Jog";
        let plan = parse_freeform(text);
        assert!(plan.extra_categories.is_empty());
        // "Hip Circles" was prose outside any recognized section.
        assert_eq!(plan.items.len(), 1);
        assert_eq!(plan.items_for(Category::Warmup), &["Jog".to_string()]);
    }

    #[test]
    fn worst_case_is_an_empty_plan() {
        let plan = parse_freeform("nothing recognizable here\nat all");
        assert_eq!(plan, ParsedPlan::default());
        assert!(parse_freeform("").items.is_empty());
    }
}
