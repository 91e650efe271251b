//! Prompt text for the plan request and the correction turns.
//!
//! The retry controller never tailors its re-ask to the categories that
//! failed — it always re-asks for all four. Narrow corrections were observed
//! to make small models drop the categories that were already correct.

/// System prompt for responders that support one.
pub const SYSTEM_PROMPT: &str = "You have to answer, do not ask follow-up questions";

/// Output-format instruction appended to the initial request.
const OUTPUT_FORMAT: &str = "Output the response in the sequence of warmup, \
strength, cardio and core. Each exercise should be on a new line, listed below \
its category. Only provide 5 exercises per category.";

/// Fixed re-ask suffix appended to every corrective message.
pub const REDO_SUFFIX: &str =
    "\nProvide 5 exercises per exercise category (warmup, strength, cardio and core) again";

/// Build the initial plan-request prompt around the caller's patient and
/// exercise information blob.
pub fn plan_prompt(patient_and_exercise_info: &str) -> String {
    format!(
        "There are 4 exercise categories: Warmup, Strength, Cardio and Core. \
For each category, prescribe exactly 5 exercises.\n{}\n{}",
        patient_and_exercise_info, OUTPUT_FORMAT
    )
}

/// Build the corrective prompt from a validation report's issues.
///
/// The issues are joined with newlines so each diagnostic lands on its own
/// line, followed by [`REDO_SUFFIX`].
pub fn correction_message(issues: &[String]) -> String {
    format!("{}{}", issues.join("\n"), REDO_SUFFIX)
}
