//! # Plan Pipeline
//!
//! Extracts a structured exercise-prescription plan from free-form LLM text,
//! validates it against a fixed schema, and drives a bounded self-correction
//! loop that re-queries the model with targeted feedback.
//!
//! The input is adversarial by construction — model text has no enforced
//! grammar — so the crate is built around graceful degradation:
//!
//! - **[`parser`]** — recovers a category→items mapping from either an
//!   embedded JSON object or heading/bullet plain text; never fails.
//! - **[`validator`]** — checks the recovered plan against hard cardinality
//!   and uniqueness rules (exactly 5 unique exercises in each of the four
//!   categories) and produces machine-actionable diagnostics.
//! - **[`controller`]** — the retry loop: turns diagnostics into a corrective
//!   prompt and re-invokes the responder, bounded by an attempt budget.
//! - **[`responder`]** — the one external capability: `prompt -> text`.
//!   Built-in [`OllamaResponder`] and [`MockResponder`]; anything else via
//!   `Arc<dyn Responder>`.
//!
//! Structural validity only: the pipeline guarantees the *shape* of the plan,
//! not that the exercise choices make sense for the patient.
//!
//! ## Quick Start
//!
//! ```
//! use plan_pipeline::{MockResponder, RetrySession, SessionCtx};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Swap MockResponder for the default OllamaResponder in production.
//! let responder = Arc::new(MockResponder::fixed(
//!     r#"{"warmup":   ["w1","w2","w3","w4","w5"],
//!         "strength": ["s1","s2","s3","s4","s5"],
//!         "cardio":   ["c1","c2","c3","c4","c5"],
//!         "core":     ["k1","k2","k3","k4","k5"]}"#,
//! ));
//! let ctx = SessionCtx::builder("http://localhost:11434")
//!     .responder(responder)
//!     .build();
//!
//! let outcome = RetrySession::new()
//!     .run(&ctx, &plan_pipeline::prompt::plan_prompt("patient info here"))
//!     .await?;
//! assert!(outcome.report.is_valid);
//! assert_eq!(outcome.attempts_used, 0);
//! # Ok(())
//! # }
//! ```
//!
//! ## One-shot helpers
//!
//! Without the loop, the parse/validate layer is usable directly:
//!
//! ```
//! use plan_pipeline::{improve_response, validity_check};
//!
//! let report = validity_check("Warmup\n- Jog\n- Stretch");
//! assert!(!report.is_valid);
//! assert_eq!(report.counts["warmup"], 2);
//! assert!(improve_response("Warmup\n- Jog\n- Stretch").contains("warmup"));
//! ```

pub mod category;
pub mod controller;
pub mod error;
pub mod events;
pub mod parser;
pub mod plan;
pub mod prompt;
pub mod responder;
pub mod session;
pub mod validator;

pub use category::Category;
pub use controller::{run_with_correction, CorrectionOutcome, RetrySession, DEFAULT_MAX_ATTEMPTS};
pub use error::{PlanError, Result};
pub use events::{Event, EventHandler, FnEventHandler};
pub use parser::{parse_freeform, parse_response, try_structured};
pub use plan::ParsedPlan;
pub use responder::{GenConfig, MockResponder, OllamaResponder, PromptRequest, Responder};
pub use session::{SessionCtx, SessionCtxBuilder};
pub use validator::{
    improve_response, validate, validity_check, ValidationReport, REQUIRED_PER_CATEGORY,
};
