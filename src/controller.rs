//! The bounded correction loop.
//!
//! [`RetrySession`] sends the initial prompt, validates the response, and —
//! while invalid and under budget — feeds the validator's issues back to the
//! responder as a corrective prompt. Strictly sequential: every responder
//! call completes and is validated before the next is built. Budget
//! exhaustion is a normal outcome, not an error; responder failures and
//! cancellation propagate immediately.

use crate::error::Result;
use crate::events::{emit, Event};
use crate::prompt;
use crate::responder::PromptRequest;
use crate::session::SessionCtx;
use crate::validator::{validity_check, ValidationReport};

/// Default maximum corrective round-trips after the initial response.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Result of one correction loop.
#[derive(Debug, Clone)]
pub struct CorrectionOutcome {
    /// The last response text received (valid or not).
    pub text: String,
    /// The validation report for `text`.
    pub report: ValidationReport,
    /// Corrective round-trips used (0 = valid on first response).
    pub attempts_used: u32,
    /// True when the loop stopped because the budget ran out while the
    /// response was still invalid. The caller decides what that means.
    pub exhausted: bool,
}

/// One correction loop: created per request, never shared.
#[derive(Debug, Clone)]
pub struct RetrySession {
    max_attempts: u32,
}

impl Default for RetrySession {
    fn default() -> Self {
        Self::new()
    }
}

impl RetrySession {
    /// Session with the default attempt budget.
    pub fn new() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Session with a custom attempt budget.
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Returns the attempt budget.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run the correction loop to completion.
    ///
    /// Sends `initial_prompt`, then while the parsed response is invalid and
    /// attempts remain, sends the issues joined with newlines plus the fixed
    /// re-ask suffix. Terminates within `max_attempts + 1` responder calls.
    ///
    /// Errors are reserved for the responder failing or the session being
    /// cancelled — an invalid-but-well-received response never errors.
    pub async fn run(&self, ctx: &SessionCtx, initial_prompt: &str) -> Result<CorrectionOutcome> {
        emit(
            &ctx.event_handler,
            Event::SessionStart {
                attempt_budget: self.max_attempts,
            },
        );

        let mut attempts_used: u32 = 0;

        let mut text = match self.send(ctx, initial_prompt).await {
            Ok(text) => text,
            Err(e) => {
                emit(
                    &ctx.event_handler,
                    Event::SessionEnd {
                        attempts_used,
                        valid: false,
                    },
                );
                return Err(e);
            }
        };
        let mut report = validity_check(&text);
        emit(
            &ctx.event_handler,
            Event::AttemptValidated {
                attempt: 0,
                valid: report.is_valid,
                issues: report.issues.len(),
            },
        );

        while !report.is_valid && attempts_used < self.max_attempts {
            attempts_used += 1;
            let message = prompt::correction_message(&report.issues);
            emit(
                &ctx.event_handler,
                Event::CorrectionSent {
                    attempt: attempts_used,
                    message: message.clone(),
                },
            );

            text = match self.send(ctx, &message).await {
                Ok(text) => text,
                Err(e) => {
                    emit(
                        &ctx.event_handler,
                        Event::SessionEnd {
                            attempts_used,
                            valid: false,
                        },
                    );
                    return Err(e);
                }
            };
            report = validity_check(&text);
            emit(
                &ctx.event_handler,
                Event::AttemptValidated {
                    attempt: attempts_used,
                    valid: report.is_valid,
                    issues: report.issues.len(),
                },
            );
        }

        let exhausted = !report.is_valid;
        emit(
            &ctx.event_handler,
            Event::SessionEnd {
                attempts_used,
                valid: report.is_valid,
            },
        );

        Ok(CorrectionOutcome {
            text,
            report,
            attempts_used,
            exhausted,
        })
    }

    /// One responder round-trip, with a cancellation check first.
    async fn send(&self, ctx: &SessionCtx, prompt_text: &str) -> Result<String> {
        ctx.check_cancelled()?;
        let request = PromptRequest {
            model: ctx.model.clone(),
            system_prompt: ctx.system_prompt.clone(),
            prompt: prompt_text.to_string(),
            config: ctx.config.clone(),
        };
        ctx.responder
            .respond(&ctx.client, &ctx.base_url, &request)
            .await
    }
}

/// Convenience wrapper: run a correction loop with an explicit budget.
pub async fn run_with_correction(
    ctx: &SessionCtx,
    initial_prompt: &str,
    max_attempts: u32,
) -> Result<CorrectionOutcome> {
    RetrySession::with_max_attempts(max_attempts)
        .run(ctx, initial_prompt)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanError;
    use crate::events::{Event, FnEventHandler};
    use crate::prompt::REDO_SUFFIX;
    use crate::responder::{MockResponder, PromptRequest, Responder};
    use async_trait::async_trait;
    use reqwest::Client;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    const VALID: &str = r#"{"warmup": ["a1","a2","a3","a4","a5"],
                            "strength": ["b1","b2","b3","b4","b5"],
                            "cardio": ["c1","c2","c3","c4","c5"],
                            "core": ["d1","d2","d3","d4","d5"]}"#;

    const INVALID: &str = r#"{"warmup": ["a1","a2"], "strength": [],
                              "cardio": ["c1","c2","c3","c4","c5"],
                              "core": ["d1","d2","d3","d4","d5"]}"#;

    fn ctx_with(mock: Arc<MockResponder>) -> SessionCtx {
        SessionCtx::builder("http://unused").responder(mock).build()
    }

    struct FailingResponder;

    #[async_trait]
    impl Responder for FailingResponder {
        async fn respond(
            &self,
            _client: &Client,
            _base_url: &str,
            _request: &PromptRequest,
        ) -> crate::error::Result<String> {
            Err(PlanError::HttpError {
                status: 503,
                body: "model offline".into(),
            })
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[tokio::test]
    async fn valid_first_response_uses_zero_attempts() {
        let mock = Arc::new(MockResponder::fixed(VALID));
        let ctx = ctx_with(mock.clone());
        let outcome = RetrySession::new().run(&ctx, "plan").await.unwrap();
        assert!(outcome.report.is_valid);
        assert!(!outcome.exhausted);
        assert_eq!(outcome.attempts_used, 0);
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn invalid_then_valid_uses_one_attempt() {
        let mock = Arc::new(MockResponder::new(vec![INVALID.into(), VALID.into()]));
        let ctx = ctx_with(mock.clone());
        let outcome = RetrySession::new().run(&ctx, "plan").await.unwrap();
        assert!(outcome.report.is_valid);
        assert_eq!(outcome.attempts_used, 1);
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn budget_exhaustion_is_a_normal_outcome() {
        let mock = Arc::new(MockResponder::fixed("no plan here, sorry"));
        let ctx = ctx_with(mock.clone());
        let outcome = RetrySession::new().run(&ctx, "plan").await.unwrap();
        assert!(!outcome.report.is_valid);
        assert!(outcome.exhausted);
        assert_eq!(outcome.attempts_used, DEFAULT_MAX_ATTEMPTS);
        // Bounded: initial call plus one per attempt, never more.
        assert_eq!(mock.calls(), DEFAULT_MAX_ATTEMPTS as usize + 1);
        assert_eq!(outcome.text, "no plan here, sorry");
    }

    #[tokio::test]
    async fn custom_budget_is_respected() {
        let mock = Arc::new(MockResponder::fixed(INVALID));
        let ctx = ctx_with(mock.clone());
        let outcome = run_with_correction(&ctx, "plan", 2).await.unwrap();
        assert!(outcome.exhausted);
        assert_eq!(outcome.attempts_used, 2);
        assert_eq!(mock.calls(), 3);
    }

    #[tokio::test]
    async fn correction_message_carries_issues_and_reask() {
        let sent: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = sent.clone();
        let mock = Arc::new(MockResponder::new(vec![INVALID.into(), VALID.into()]));
        let ctx = SessionCtx::builder("http://unused")
            .responder(mock)
            .event_handler(Arc::new(FnEventHandler(move |event: Event| {
                if let Event::CorrectionSent { message, .. } = event {
                    sink.lock().unwrap().push(message);
                }
            })))
            .build();

        RetrySession::new().run(&ctx, "plan").await.unwrap();

        let messages = sent.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("only 2 exercises given for warmup"));
        assert!(messages[0].contains("no exercises given for strength"));
        assert!(messages[0].ends_with(REDO_SUFFIX));
    }

    #[tokio::test]
    async fn responder_failure_propagates_as_error() {
        let ctx = SessionCtx::builder("http://unused")
            .responder(Arc::new(FailingResponder))
            .build();
        let result = RetrySession::new().run(&ctx, "plan").await;
        assert!(matches!(
            result,
            Err(PlanError::HttpError { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn cancellation_stops_before_the_first_call() {
        let flag = Arc::new(AtomicBool::new(true));
        let mock = Arc::new(MockResponder::fixed(VALID));
        let ctx = SessionCtx::builder("http://unused")
            .responder(mock.clone())
            .cancellation(flag)
            .build();
        let result = RetrySession::new().run(&ctx, "plan").await;
        assert!(matches!(result, Err(PlanError::Cancelled)));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn cancellation_mid_loop_stops_corrections() {
        let flag = Arc::new(AtomicBool::new(false));
        let stopper = flag.clone();
        let mock = Arc::new(MockResponder::fixed(INVALID));
        let ctx = SessionCtx::builder("http://unused")
            .responder(mock.clone())
            .cancellation(flag)
            .event_handler(Arc::new(FnEventHandler(move |event: Event| {
                // Cancel as soon as the first correction goes out.
                if matches!(event, Event::CorrectionSent { .. }) {
                    stopper.store(true, Ordering::Relaxed);
                }
            })))
            .build();
        let result = RetrySession::new().run(&ctx, "plan").await;
        assert!(matches!(result, Err(PlanError::Cancelled)));
        // Only the initial call went through.
        assert_eq!(mock.calls(), 1);
    }
}
