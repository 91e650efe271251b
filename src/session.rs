//! Session context shared across correction attempts.
//!
//! [`SessionCtx`] carries the HTTP client, responder, endpoint, model id,
//! generation config, cancellation handle, and optional event handler. Build
//! one per logical request; independent sessions share no mutable state and
//! may run concurrently.

use crate::error::Result;
use crate::events::EventHandler;
use crate::responder::{GenConfig, OllamaResponder, Responder};
use crate::PlanError;
use reqwest::Client;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

/// Everything the correction loop needs from the runtime environment.
///
/// # Example
///
/// ```
/// use plan_pipeline::SessionCtx;
///
/// let ctx = SessionCtx::builder("http://localhost:11434")
///     .model("llama3.2:3b")
///     .system_prompt(plan_pipeline::prompt::SYSTEM_PROMPT)
///     .build();
/// ```
pub struct SessionCtx {
    /// HTTP client (cheap to clone -- uses `Arc` internally).
    pub client: Client,
    /// Base URL for the model provider (e.g. `http://localhost:11434`).
    pub base_url: String,
    /// The response capability. Default: [`OllamaResponder`].
    pub responder: Arc<dyn Responder>,
    /// Model identifier passed through to the responder.
    pub model: String,
    /// Optional system prompt sent with every attempt.
    pub system_prompt: Option<String>,
    /// Generation parameters.
    pub config: GenConfig,
    /// Optional cancellation flag; checked before every responder call.
    pub cancellation: Option<Arc<AtomicBool>>,
    /// Optional event handler for correction-loop lifecycle events.
    pub event_handler: Option<Arc<dyn EventHandler>>,
}

impl SessionCtx {
    /// Create a new builder.
    pub fn builder(base_url: impl Into<String>) -> SessionCtxBuilder {
        SessionCtxBuilder {
            client: None,
            base_url: base_url.into(),
            responder: None,
            model: None,
            system_prompt: None,
            config: None,
            cancellation: None,
            event_handler: None,
            timeout: None,
        }
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|c| c.load(Ordering::Relaxed))
    }

    /// Return an error if cancellation has been requested.
    pub fn check_cancelled(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(PlanError::Cancelled);
        }
        Ok(())
    }
}

impl std::fmt::Debug for SessionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCtx")
            .field("base_url", &self.base_url)
            .field("responder", &self.responder.name())
            .field("model", &self.model)
            .field("has_system_prompt", &self.system_prompt.is_some())
            .field("has_cancellation", &self.cancellation.is_some())
            .field("has_event_handler", &self.event_handler.is_some())
            .finish()
    }
}

/// Builder for [`SessionCtx`].
pub struct SessionCtxBuilder {
    client: Option<Client>,
    base_url: String,
    responder: Option<Arc<dyn Responder>>,
    model: Option<String>,
    system_prompt: Option<String>,
    config: Option<GenConfig>,
    cancellation: Option<Arc<AtomicBool>>,
    event_handler: Option<Arc<dyn EventHandler>>,
    timeout: Option<Duration>,
}

impl SessionCtxBuilder {
    /// Set the HTTP client. If not set, a default client is created.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the responder. Default: [`OllamaResponder`].
    pub fn responder(mut self, responder: Arc<dyn Responder>) -> Self {
        self.responder = Some(responder);
        self
    }

    /// Set the model identifier. Default: `"llama3.2:3b"`.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set a system prompt sent with every attempt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set the generation parameters.
    pub fn config(mut self, config: GenConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the cancellation flag.
    pub fn cancellation(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancellation = Some(cancel);
        self
    }

    /// Set the event handler.
    pub fn event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    /// Set the request timeout. Default: 60 seconds.
    ///
    /// Ignored when a custom `Client` is provided via
    /// [`client`](Self::client) — that client's own timeout applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the session context.
    pub fn build(self) -> SessionCtx {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(60));
        let client = self.client.unwrap_or_else(|| {
            Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client")
        });
        SessionCtx {
            client,
            base_url: normalize_base_url(&self.base_url),
            responder: self.responder.unwrap_or_else(|| Arc::new(OllamaResponder)),
            model: self.model.unwrap_or_else(|| "llama3.2:3b".to_string()),
            system_prompt: self.system_prompt,
            config: self.config.unwrap_or_default(),
            cancellation: self.cancellation,
            event_handler: self.event_handler,
        }
    }
}

/// Strip known provider path suffixes from a base URL.
/// This prevents double-pathing when the responder appends its own paths.
/// e.g., "http://localhost:11434/api" -> "http://localhost:11434"
fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    for suffix in &["/api/generate", "/api/chat", "/api"] {
        if let Some(stripped) = trimmed.strip_suffix(suffix) {
            return stripped.to_string();
        }
    }
    trimmed.to_string()
}
