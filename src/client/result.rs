//! Classification of provider responses.

use serde::Serialize;
use serde_json::Value;

use crate::transport::HttpResponse;

/// Outcome of one send request.
///
/// The provider answers 200 on success. Any other status is reported here
/// rather than as an error, with the provider's error object preserved
/// as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendResult {
    /// True if the provider answered 200
    pub success: bool,
    /// HTTP status code
    pub http_status: u16,
    /// Parsed response body, if it was JSON
    pub body: Option<Value>,
    /// The `error` object of a failed response, or its whole body when
    /// the provider sent no `error` key
    pub provider_error: Option<Value>,
}

impl SendResult {
    /// Classifies a transport response.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let success = response.status == http::StatusCode::OK;
        let body = response.json();
        let provider_error = if success {
            None
        } else {
            body.as_ref()
                .map(|b| b.get("error").cloned().unwrap_or_else(|| b.clone()))
        };

        Self {
            success,
            http_status: response.status.as_u16(),
            body,
            provider_error,
        }
    }

    /// Id of the sent message, from `messages[0].id`.
    #[must_use]
    pub fn message_id(&self) -> Option<&str> {
        self.body.as_ref()?.pointer("/messages/0/id")?.as_str()
    }
}
