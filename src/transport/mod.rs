//! Transport layer between the messaging client and the Graph API.
//!
//! This module provides:
//! - Request and response value types ([`HttpRequest`], [`HttpResponse`])
//! - The transport abstraction ([`HttpClient`])
//! - The production implementation ([`ReqwestClient`])
//!
//! Nothing here knows about message payloads; the client hands in a fully
//! built request and classifies whatever comes back.

mod client;
mod error;
mod http;

#[cfg(test)]
mod http_tests;

pub use client::ReqwestClient;
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
