//! Inbound webhook handling.
//!
//! This module provides:
//! - Field extraction from deliveries ([`WebhookEvent`], [`WebhookSummary`])
//! - Signature and subscription checks ([`verify_signature`], [`verify_subscription`])
//!
//! Extraction is read-only: events are never written back or stored.

mod error;
mod event;
mod signature;


pub use error::WebhookError;
pub use event::{WebhookEvent, WebhookSummary};
pub use signature::{verify_signature, verify_subscription};
