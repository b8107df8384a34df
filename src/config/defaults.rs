//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

pub use crate::client::DEFAULT_API_BASE_URL as API_BASE_URL;
pub use crate::client::DEFAULT_MEDIA_STEM as MEDIA_STEM;
pub use crate::message::DEFAULT_TEMPLATE_LANGUAGE as TEMPLATE_LANGUAGE;

/// Default request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default path written by `init`.
pub const CONFIG_FILE: &str = "whatsapp-cloud.toml";

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
