//! Webhook authenticity checks.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_PREFIX: &str = "sha256=";

/// Verifies the `X-Hub-Signature-256` header of a delivery.
///
/// `signature` must be `sha256=<hex>`, the HMAC-SHA256 of the raw body
/// keyed with the app secret. Comparison is constant-time.
#[must_use]
pub fn verify_signature(payload: &[u8], signature: &str, app_secret: &str) -> bool {
    let Some(signature_hex) = signature.strip_prefix(SIGNATURE_PREFIX) else {
        tracing::warn!("Invalid signature format");
        return false;
    };

    let Ok(expected) = hex::decode(signature_hex) else {
        tracing::warn!("Failed to decode signature hex");
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(app_secret.as_bytes()) else {
        tracing::warn!("Failed to create HMAC");
        return false;
    };

    mac.update(payload);
    mac.verify_slice(&expected).is_ok()
}

/// Answers the provider's subscription handshake.
///
/// Returns the challenge to echo back when `mode` is `"subscribe"` and
/// `token` matches the configured verify token; `None` otherwise.
#[must_use]
pub fn verify_subscription<'a>(
    mode: &str,
    token: &str,
    challenge: &'a str,
    expected_token: &str,
) -> Option<&'a str> {
    if mode != "subscribe" {
        tracing::debug!(mode, "Invalid hub.mode");
        return None;
    }
    if token != expected_token {
        tracing::warn!("Webhook verification failed: token mismatch");
        return None;
    }
    Some(challenge)
}
