//! Error types for transport operations.

use thiserror::Error;

/// Error type for a single HTTP exchange with the Graph API.
///
/// Only failures that prevent a response from arriving end up here.
/// A response with a non-success status is still a response and is
/// classified by the caller.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// Covers DNS resolution failures, refused connections and
    /// broken response streams.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server did not respond within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built from the given URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
