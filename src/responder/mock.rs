//! Mock responder for testing without a live model.
//!
//! [`MockResponder`] returns pre-configured responses in order, allowing
//! deterministic tests of the correction loop: seed it with an invalid
//! response followed by a corrected one and assert on the attempt count.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::Client;

use super::{PromptRequest, Responder};
use crate::error::Result;

/// A test responder that returns canned responses in order.
///
/// Cycles back to the beginning when all responses have been consumed.
#[derive(Debug)]
pub struct MockResponder {
    responses: Vec<String>,
    index: AtomicUsize,
}

impl MockResponder {
    /// Create a mock responder with the given canned responses.
    pub fn new(responses: Vec<String>) -> Self {
        assert!(
            !responses.is_empty(),
            "MockResponder requires at least one response"
        );
        Self {
            responses,
            index: AtomicUsize::new(0),
        }
    }

    /// Create a mock that always returns the same response.
    pub fn fixed(response: impl Into<String>) -> Self {
        Self::new(vec![response.into()])
    }

    /// Number of responses handed out so far.
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }

    fn next_response(&self) -> String {
        let idx = self.index.fetch_add(1, Ordering::Relaxed) % self.responses.len();
        self.responses[idx].clone()
    }
}

#[async_trait]
impl Responder for MockResponder {
    async fn respond(
        &self,
        _client: &Client,
        _base_url: &str,
        _request: &PromptRequest,
    ) -> Result<String> {
        Ok(self.next_response())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::GenConfig;

    fn request() -> PromptRequest {
        PromptRequest {
            model: "test".to_string(),
            system_prompt: None,
            prompt: "test".to_string(),
            config: GenConfig::default(),
        }
    }

    #[tokio::test]
    async fn fixed_response() {
        let mock = MockResponder::fixed("Hello!");
        let client = Client::new();
        let text = mock.respond(&client, "http://unused", &request()).await.unwrap();
        assert_eq!(text, "Hello!");
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn cycles_responses() {
        let mock = MockResponder::new(vec!["first".into(), "second".into()]);
        let client = Client::new();
        let r1 = mock.respond(&client, "http://unused", &request()).await.unwrap();
        let r2 = mock.respond(&client, "http://unused", &request()).await.unwrap();
        let r3 = mock.respond(&client, "http://unused", &request()).await.unwrap();
        assert_eq!(r1, "first");
        assert_eq!(r2, "second");
        assert_eq!(r3, "first"); // cycles
    }
}
