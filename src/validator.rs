//! Cardinality and uniqueness validation of a parsed plan.
//!
//! The validator is a pure function from [`ParsedPlan`] to a
//! [`ValidationReport`]. Its diagnostics are worded for the model, not the
//! user: each issue names the offending category and count so a corrective
//! prompt built from them gives the model something concrete to fix.

use crate::category::Category;
use crate::parser::parse_response;
use crate::plan::ParsedPlan;
use serde::Serialize;
use std::collections::BTreeMap;

/// Exact number of exercises required in every category.
pub const REQUIRED_PER_CATEGORY: usize = 5;

/// The verdict on one parsed plan. Recomputed on every validation call.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// True iff every category has exactly five items and there are no
    /// unexpected categories or dropped duplicates.
    pub is_valid: bool,
    /// Item count per category, keyed by canonical lowercase name.
    /// Absent categories count as 0.
    pub counts: BTreeMap<&'static str, usize>,
    /// One diagnostic per detected problem, in category order first, then the
    /// unexpected-categories issue, then the duplicates issue.
    pub issues: Vec<String>,
}

/// Validate a parsed plan against the cardinality and uniqueness rules.
///
/// Pure — no side effects, no retained state. Per-category issues are emitted
/// in the fixed order of [`Category::ALL`] so reports are reproducible.
pub fn validate(plan: &ParsedPlan) -> ValidationReport {
    let mut counts = BTreeMap::new();
    let mut issues = Vec::new();

    for category in Category::ALL {
        let n = plan.count(category);
        counts.insert(category.name(), n);
        match n {
            0 => issues.push(format!("no exercises given for {}", category)),
            1 => issues.push(format!("only 1 exercise given for {}", category)),
            2..=4 => issues.push(format!("only {} exercises given for {}", n, category)),
            n if n == REQUIRED_PER_CATEGORY => {}
            n => issues.push(format!("more than 5 exercises for {} (got {})", category, n)),
        }
    }

    if !plan.extra_categories.is_empty() {
        issues.push(format!(
            "unexpected categories: {}",
            plan.extra_categories.join(", ")
        ));
    }

    if !plan.duplicates.is_empty() {
        let breakdown = Category::ALL
            .iter()
            .filter_map(|&category| {
                let dups = plan.duplicates_for(category);
                (!dups.is_empty()).then(|| format!("{}: {}", category, dups.join(", ")))
            })
            .collect::<Vec<_>>()
            .join(" | ");
        issues.push(format!("duplicate exercise names detected ({})", breakdown));
    }

    // Issue generation and the exact-count check are computed independently
    // and must agree; is_valid requires both.
    let all_exact = Category::ALL
        .iter()
        .all(|&category| plan.count(category) == REQUIRED_PER_CATEGORY);

    ValidationReport {
        is_valid: issues.is_empty() && all_exact,
        counts,
        issues,
    }
}

/// Parse raw model text and validate the result in one step.
pub fn validity_check(text: &str) -> ValidationReport {
    validate(&parse_response(text))
}

/// Build a short, model-friendly correction summary for a response.
///
/// Returns the literal `"ok"` when the response is valid, otherwise the
/// issues joined with `"; "` — e.g.
/// `"only 3 exercises given for cardio; more than 5 exercises for core (got 7)"`.
pub fn improve_response(text: &str) -> String {
    let report = validity_check(text);
    if report.is_valid {
        "ok".to_string()
    } else {
        report.issues.join("; ")
    }
}
