//! Messaging client for the WhatsApp Cloud API.
//!
//! This module provides:
//! - Client configuration ([`ClientConfig`])
//! - The client itself ([`WhatsAppClient`]): sends, read receipts, media downloads
//! - Response classification ([`SendResult`])
//! - Error types ([`ClientConfigError`], [`SendError`], [`MediaError`])
//!
//! # Error Convention
//!
//! Every operation returns a `Result`. Failures that prevent a response
//! (local validation, transport) are `Err`. A response from the provider,
//! whatever its status, is `Ok(SendResult)`; callers check
//! [`SendResult::success`].

mod config;
mod error;
mod media;
mod result;
mod sender;

#[cfg(test)]
mod sender_tests;

pub use config::{ClientConfig, DEFAULT_API_BASE_URL};
pub use error::{ClientConfigError, MediaError, SendError};
pub use media::DEFAULT_MEDIA_STEM;
pub use result::SendResult;
pub use sender::WhatsAppClient;
