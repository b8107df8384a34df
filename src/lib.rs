//! whatsapp-cloud: WhatsApp Cloud API client
//!
//! A library for sending messages through the WhatsApp Cloud API
//! and reading the webhook deliveries it sends back.

pub mod client;
pub mod config;
pub mod message;
pub mod transport;
pub mod webhook;
