//! Line-level predicates and extractors for the freeform parser.
//!
//! Each heuristic (heading, bullet, divider, meta token, emphasis) is a pure
//! function of a single line, kept separate from the state machine so they
//! can be tested in isolation. No regex — all checks are manual string
//! operations, same as the rest of the crate.

use crate::category::Category;

/// Heading tokens in longest-first order so boundary checks resolve overlaps
/// ("warm ups" before "warm up", "warmups" before "warmup").
const HEADING_TOKENS: [(&str, Category); 9] = [
    ("warm-ups", Category::Warmup),
    ("warm ups", Category::Warmup),
    ("warmups", Category::Warmup),
    ("warm-up", Category::Warmup),
    ("warm up", Category::Warmup),
    ("warmup", Category::Warmup),
    ("strength", Category::Strength),
    ("cardio", Category::Cardio),
    ("core", Category::Core),
];

/// Detect known chat-control and code-fence lines.
///
/// These are discarded unconditionally by the freeform parser — they never
/// become items and never close a section. Covers explicit end-of-turn
/// markers, code fences, and short angle-bracketed alphabetic tokens
/// (≤24 characters) that look like model control tokens.
pub fn is_meta_or_fence(line: &str) -> bool {
    let t = line.trim();
    if t.is_empty() {
        return false;
    }
    if t == "<end_of_turn>" {
        return true;
    }
    if t.to_lowercase().replace(' ', "") == "<end-of-turn>" {
        return true;
    }
    if matches!(t, "</s>" | "<eot>" | "<end>" | "<stop>") {
        return true;
    }
    if t.starts_with("```") || t == "~~~" {
        return true;
    }
    // Angle-bracketed alphabetic token like <something>: conservatively meta.
    if let Some(inner) = t.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        if inner.chars().count() <= 24
            && inner
                .chars()
                .all(|c| c.is_alphabetic() || c == '_' || c == '-')
        {
            return true;
        }
    }
    false
}

/// Section-divider lines: solely `-`/`=` characters, length ≥3.
pub fn is_divider(line: &str) -> bool {
    let t = line.trim();
    t.len() >= 3 && t.chars().all(|c| c == '-' || c == '=')
}

/// Find a word-bounded category token anywhere in the line.
///
/// Returns the category of the leftmost bounded token, regardless of any
/// other content on the line — "## Warmup Exercises:" and "Strength" both
/// count as headings.
pub fn heading_category(line: &str) -> Option<Category> {
    let lower = line.to_lowercase();
    let mut best: Option<(usize, Category)> = None;
    for (token, category) in HEADING_TOKENS {
        let mut from = 0;
        while let Some(offset) = lower[from..].find(token) {
            let start = from + offset;
            let end = start + token.len();
            if word_bounded(&lower, start, end) {
                if best.map_or(true, |(pos, _)| start < pos) {
                    best = Some((start, category));
                }
                break;
            }
            from = start + 1;
        }
    }
    best.map(|(_, category)| category)
}

/// Whether `s[start..end]` is bounded by non-alphanumeric characters.
fn word_bounded(s: &str, start: usize, end: usize) -> bool {
    let before_ok = s[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = s[end..].chars().next().map_or(true, |c| !c.is_alphanumeric());
    before_ok && after_ok
}

/// Extract the item text after a bullet or list-number marker.
///
/// Recognizes dash/en-dash/em-dash/asterisk/bullet glyphs and `N.`/`N)`
/// prefixes (1–2 digits). Returns `None` when the line has no marker or the
/// remainder after the marker is empty — the caller then falls back to
/// treating the whole line as an item.
pub fn bullet_candidate(line: &str) -> Option<&str> {
    let t = line.trim_start();
    for marker in ['-', '\u{2013}', '\u{2014}', '*', '\u{2022}'] {
        if let Some(rest) = t.strip_prefix(marker) {
            let rest = rest.trim();
            return (!rest.is_empty()).then_some(rest);
        }
    }
    let digits = t.chars().take_while(|c| c.is_ascii_digit()).count();
    if (1..=2).contains(&digits) {
        let after = &t[digits..];
        if let Some(rest) = after.strip_prefix('.').or_else(|| after.strip_prefix(')')) {
            let rest = rest.trim();
            return (!rest.is_empty()).then_some(rest);
        }
    }
    None
}

/// Strip one matching pair of `**`/`__` emphasis markers and re-trim.
pub fn strip_emphasis(s: &str) -> &str {
    let t = s.trim();
    for marker in ["**", "__"] {
        if let Some(mid) = t
            .strip_prefix(marker)
            .and_then(|rest| rest.strip_suffix(marker))
        {
            return mid.trim();
        }
    }
    t
}
