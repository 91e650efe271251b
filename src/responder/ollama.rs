//! Responder for Ollama's native API.
//!
//! Uses `/api/generate` for prompt-only requests and `/api/chat` when a
//! system prompt is present. Non-success status codes surface as
//! [`PlanError::HttpError`]; connection failures as a descriptive `Other`.

use super::{PromptRequest, Responder};
use crate::error::Result;
use crate::PlanError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

/// Responder backed by a local or remote Ollama server.
///
/// This is the default responder. Existing code using
/// `SessionCtx::builder("url").build()` gets it automatically.
#[derive(Debug, Clone)]
pub struct OllamaResponder;

impl OllamaResponder {
    /// Build the Ollama `options` object from the generation config.
    fn build_options(request: &PromptRequest) -> Value {
        json!({
            "temperature": request.config.temperature,
            "num_predict": request.config.max_tokens,
        })
    }

    /// Whether this request should use `/api/chat` (vs `/api/generate`).
    fn use_chat(request: &PromptRequest) -> bool {
        request
            .system_prompt
            .as_ref()
            .is_some_and(|s| !s.is_empty())
    }

    /// Build the JSON body for `/api/generate`.
    fn build_generate_body(request: &PromptRequest) -> Value {
        let mut body = json!({
            "model": request.model,
            "prompt": request.prompt,
            "stream": false,
            "options": Self::build_options(request),
        });
        if request.config.json_mode {
            body["format"] = json!("json");
        }
        body
    }

    /// Build the JSON body for `/api/chat`.
    fn build_chat_body(request: &PromptRequest) -> Value {
        let mut messages = Vec::new();
        if let Some(ref sys) = request.system_prompt {
            if !sys.is_empty() {
                messages.push(json!({"role": "system", "content": sys}));
            }
        }
        messages.push(json!({"role": "user", "content": request.prompt}));

        let mut body = json!({
            "model": request.model,
            "messages": messages,
            "stream": false,
            "options": Self::build_options(request),
        });
        if request.config.json_mode {
            body["format"] = json!("json");
        }
        body
    }

    /// Send a request and return the decoded response body.
    async fn send_request(client: &Client, url: &str, body: &Value) -> Result<Value> {
        let resp = client.post(url).json(body).send().await.map_err(|e| {
            PlanError::Other(format!("Failed to connect to LLM at {}: {}", url, e))
        })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(PlanError::HttpError {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(resp.json().await?)
    }
}

#[async_trait]
impl Responder for OllamaResponder {
    async fn respond(
        &self,
        client: &Client,
        base_url: &str,
        request: &PromptRequest,
    ) -> Result<String> {
        let (url, body, text_path) = if Self::use_chat(request) {
            (
                format!("{}/api/chat", base_url),
                Self::build_chat_body(request),
                &["message", "content"][..],
            )
        } else {
            (
                format!("{}/api/generate", base_url),
                Self::build_generate_body(request),
                &["response"][..],
            )
        };

        let json_resp = Self::send_request(client, &url, &body).await?;

        let mut node = &json_resp;
        for key in text_path {
            node = node.get(key).unwrap_or(&Value::Null);
        }
        Ok(node.as_str().unwrap_or_default().to_string())
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}
