use thiserror::Error;

/// Errors produced by the plan pipeline and its components.
///
/// Malformed model *output* is never an error — the parsers tolerate it and
/// the validator turns it into issues. Errors here are for the things the
/// pipeline cannot recover from: transport failures, cancellation, bad config.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Low-level HTTP transport failure (connection refused, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON handling failed at the serde level (provider response bodies).
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP error with status code and response body.
    ///
    /// Returned by [`Responder`](crate::responder::Responder) implementations
    /// when the provider returns a non-success status code.
    #[error("HTTP {status}: {body}")]
    HttpError {
        /// HTTP status code (e.g. 429, 500, 503).
        status: u16,
        /// Response body text.
        body: String,
    },

    /// The correction loop was cancelled via the cancellation flag.
    #[error("Correction loop was cancelled")]
    Cancelled,

    /// Invalid configuration detected at build time.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for PlanError {
    fn from(err: anyhow::Error) -> Self {
        PlanError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
