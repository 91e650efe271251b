//! Tolerant extraction of a category→items plan from raw model text.
//!
//! Two paths: [`structured`] decodes an embedded JSON object when one exists;
//! [`freeform`] is the line-oriented fallback for heading/bullet output.
//! [`parse_response`] ties them together and always succeeds — adversarial
//! input degrades to an empty plan, never an error.

pub mod freeform;
pub mod patterns;
pub mod structured;

pub use freeform::parse_freeform;
pub use structured::try_structured;

use crate::plan::ParsedPlan;

/// Parse raw model text into a [`ParsedPlan`].
///
/// Prefers the structured (embedded JSON) path; when that yields nothing the
/// freeform heading/bullet parser takes over. Never fails — the worst case is
/// a plan with every field empty.
pub fn parse_response(text: &str) -> ParsedPlan {
    if let Some(plan) = try_structured(text) {
        return plan;
    }
    parse_freeform(text)
}
