//! Responder trait and normalized request type.
//!
//! The [`Responder`] trait is the pipeline's only external capability: given
//! a prompt, produce model text. The core treats it as opaque — it assumes
//! nothing about model identity, batching, or transport. Built-in
//! implementations: [`OllamaResponder`], [`MockResponder`].

pub mod mock;
pub mod ollama;

pub use mock::MockResponder;
pub use ollama::OllamaResponder;

use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Generation parameters passed through to the provider.
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Temperature (0.0 = deterministic, 1.0 = creative).
    pub temperature: f64,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Request JSON-format output from the model. Makes the structured parse
    /// path far more likely to succeed on the first attempt.
    pub json_mode: bool,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2048,
            json_mode: false,
        }
    }
}

impl GenConfig {
    pub fn with_temperature(mut self, temp: f64) -> Self {
        self.temperature = temp;
        self
    }

    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = tokens;
        self
    }

    pub fn with_json_mode(mut self, enabled: bool) -> Self {
        self.json_mode = enabled;
        self
    }
}

/// A normalized prompt request — provider-agnostic.
///
/// The retry controller builds one of these per attempt from the
/// [`SessionCtx`](crate::session::SessionCtx) defaults and the current prompt.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    /// Model identifier (e.g. `"llama3.2:3b"`, `"gemma2:2b"`).
    pub model: String,
    /// Optional system prompt (switches Ollama to the chat endpoint).
    pub system_prompt: Option<String>,
    /// The user prompt text.
    pub prompt: String,
    /// Generation parameters.
    pub config: GenConfig,
}

/// Abstraction over model-text providers.
///
/// One operation: [`respond`](Responder::respond). A failure here is fatal to
/// the current correction attempt and is propagated to the caller — the
/// controller never masks a responder failure as a validation issue.
///
/// # Object Safety
///
/// This trait is object-safe and designed to be used as `Arc<dyn Responder>`.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Produce model text for a prompt.
    async fn respond(
        &self,
        client: &Client,
        base_url: &str,
        request: &PromptRequest,
    ) -> Result<String>;

    /// Human-readable name for logging and diagnostics.
    fn name(&self) -> &'static str;
}
