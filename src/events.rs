//! Event hooks for observing the correction loop.
//!
//! Provides an optional, non-intrusive way to watch a correction session:
//! when it starts, how each attempt validated, what corrections were sent,
//! and how it ended. Implement [`EventHandler`] to receive these for logging
//! or progress display. Entirely optional — the loop works without one.

use std::sync::Arc;

/// Events emitted during a correction session.
#[derive(Debug, Clone)]
pub enum Event {
    /// The correction session has started.
    SessionStart {
        /// Maximum corrective round-trips allowed.
        attempt_budget: u32,
    },
    /// A response was parsed and validated.
    AttemptValidated {
        /// 0 for the initial response, then 1-indexed corrections.
        attempt: u32,
        /// Whether the response passed validation.
        valid: bool,
        /// Number of issues in the report.
        issues: usize,
    },
    /// A corrective prompt was sent to the responder.
    CorrectionSent {
        /// The correction attempt number (1-indexed).
        attempt: u32,
        /// The full corrective message.
        message: String,
    },
    /// The correction session has finished.
    SessionEnd {
        /// Corrective round-trips used.
        attempts_used: u32,
        /// Whether the final response was valid.
        valid: bool,
    },
}

/// Handler for correction-session events.
pub trait EventHandler: Send + Sync {
    /// Called when the session emits an event.
    fn on_event(&self, event: Event);
}

/// Emit an event if a handler is present. No-op otherwise.
pub(crate) fn emit(handler: &Option<Arc<dyn EventHandler>>, event: Event) {
    if let Some(ref h) = handler {
        h.on_event(event);
    }
}

/// An [`EventHandler`] backed by a closure.
///
/// # Example
///
/// ```
/// use plan_pipeline::events::{Event, FnEventHandler};
/// use std::sync::Arc;
///
/// let handler = Arc::new(FnEventHandler(|event: Event| {
///     if let Event::AttemptValidated { attempt, valid, issues } = event {
///         eprintln!("attempt {} valid={} issues={}", attempt, valid, issues);
///     }
/// }));
/// ```
pub struct FnEventHandler<F: Fn(Event) + Send + Sync>(pub F);

impl<F: Fn(Event) + Send + Sync> EventHandler for FnEventHandler<F> {
    fn on_event(&self, event: Event) {
        (self.0)(event);
    }
}
