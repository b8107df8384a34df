//! Local precondition failures for outbound messages.

use thiserror::Error;

/// A message was rejected before any request was issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The location request body exceeds the provider's limit.
    #[error("Location request body is {length} characters, the maximum is {max}")]
    LocationRequestTooLong {
        /// Length of the supplied body in characters
        length: usize,
        /// Maximum accepted length in characters
        max: usize,
    },
}
