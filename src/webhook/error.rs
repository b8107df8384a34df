//! Error types for webhook parsing.

use thiserror::Error;

/// Error type for turning a webhook delivery into a [`WebhookEvent`](super::WebhookEvent).
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The delivery body is not JSON.
    #[error("Webhook body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The delivery lacks the structure every provider event carries.
    #[error("Malformed webhook payload: missing {path}")]
    Malformed {
        /// Path that could not be resolved
        path: &'static str,
    },
}
