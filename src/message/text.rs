//! Text messages and body chunking.

use serde_json::{Value, json};

use super::{MESSAGING_PRODUCT, RECIPIENT_INDIVIDUAL};

/// Maximum number of characters the provider accepts in one text body.
pub const MAX_TEXT_CHARS: usize = 4096;

/// A plain text message, optionally replying to an earlier message.
///
/// Bodies longer than [`MAX_TEXT_CHARS`] are sent as several independent
/// messages; see [`chunk_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessage {
    /// Message text
    pub body: String,
    /// Whether the provider should render a link preview
    pub preview_url: bool,
    /// Message being replied to, if any
    pub reply_to: Option<String>,
    /// Recipient type, `"individual"` unless addressing a group
    pub recipient_type: String,
}

impl TextMessage {
    /// Creates a text message with link previews enabled.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            preview_url: true,
            reply_to: None,
            recipient_type: RECIPIENT_INDIVIDUAL.to_string(),
        }
    }

    /// Marks the message as a reply to `message_id`.
    #[must_use]
    pub fn reply_to(mut self, message_id: impl Into<String>) -> Self {
        self.reply_to = Some(message_id.into());
        self
    }

    /// Enables or disables the link preview.
    #[must_use]
    pub const fn with_preview_url(mut self, preview_url: bool) -> Self {
        self.preview_url = preview_url;
        self
    }

    /// Sets the recipient type.
    #[must_use]
    pub fn with_recipient_type(mut self, recipient_type: impl Into<String>) -> Self {
        self.recipient_type = recipient_type.into();
        self
    }

    /// Builds one payload per chunk of the body, in order.
    pub(super) fn payloads(&self, to: &str) -> Vec<Value> {
        chunk_text(&self.body, MAX_TEXT_CHARS)
            .into_iter()
            .map(|chunk| self.payload(to, chunk))
            .collect()
    }

    fn payload(&self, to: &str, chunk: &str) -> Value {
        let mut payload = json!({
            "messaging_product": MESSAGING_PRODUCT,
            "recipient_type": self.recipient_type,
            "to": to,
            "type": "text",
            "text": {"preview_url": self.preview_url, "body": chunk},
        });
        if let Some(message_id) = &self.reply_to {
            payload["context"] = json!({"message_id": message_id});
        }
        payload
    }
}

/// Splits `text` into successive slices of at most `max_chars` characters.
///
/// Slicing is by Unicode scalar value with no regard for word boundaries,
/// so concatenating the result always yields `text` again. An empty input
/// produces a single empty chunk: an empty body is still one message.
///
/// # Panics
///
/// Panics if `max_chars` is zero.
#[must_use]
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<&str> {
    assert!(max_chars > 0, "chunk size must be positive");

    let mut chunks = Vec::new();
    let mut rest = text;
    loop {
        let split = rest
            .char_indices()
            .nth(max_chars)
            .map_or(rest.len(), |(index, _)| index);
        let (chunk, tail) = rest.split_at(split);
        chunks.push(chunk);
        if tail.is_empty() {
            return chunks;
        }
        rest = tail;
    }
}
