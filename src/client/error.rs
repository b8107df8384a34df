//! Error types for the messaging client.

use std::path::PathBuf;

use thiserror::Error;

use crate::message::ValidationError;
use crate::transport::HttpError;

/// Error type for building a [`ClientConfig`](super::ClientConfig).
#[derive(Debug, Error)]
pub enum ClientConfigError {
    /// A required value is empty.
    #[error("Missing required value: {0}")]
    Missing(&'static str),

    /// The API base URL could not be parsed.
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// The access token cannot be sent as an HTTP header value.
    #[error("Access token contains characters not allowed in an HTTP header")]
    InvalidAccessToken,
}

/// Error type for send operations.
///
/// A response with a non-200 status is not an error; it is reported
/// through [`SendResult`](super::SendResult).
#[derive(Debug, Error)]
pub enum SendError {
    /// The message failed a local check; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No response was received.
    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    /// The payload could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Error type for media downloads.
#[derive(Debug, Error)]
pub enum MediaError {
    /// No response was received.
    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    /// The media server answered with a non-success status.
    #[error("Media download failed with status {status}")]
    Status {
        /// Status returned by the server
        status: http::StatusCode,
    },

    /// The MIME type has no subtype to derive a file extension from.
    #[error("Invalid MIME type '{0}': expected 'type/subtype'")]
    InvalidMimeType(String),

    /// The downloaded bytes could not be written.
    #[error("Failed to write media to '{}': {source}", path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
