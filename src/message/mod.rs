//! Outbound message payloads.
//!
//! Every message kind the client can send is a variant of
//! [`OutboundMessage`]. [`OutboundMessage::build`] turns a message into
//! the provider's wire schema: one JSON object per request to issue.
//! Only text messages ever produce more than one payload.
//!
//! Builders are pure. Nothing in this module performs I/O, which is why
//! the only local check, the location request length limit, surfaces here
//! as a [`ValidationError`] before any request exists.

mod error;
mod interactive;
mod media;
mod template;
mod text;


use serde_json::{Value, json};

pub use error::ValidationError;
pub use interactive::{
    ButtonMessage, CtaUrlButton, DEFAULT_LIST_BUTTON, DEFAULT_LIST_SECTION, ListMessage,
    ListOption, LocationRequest, MAX_LOCATION_REQUEST_CHARS, reply_buttons,
};
pub use media::{DocumentMessage, ImageMessage, MediaSource};
pub use template::{DEFAULT_TEMPLATE_LANGUAGE, Template, text_parameters};
pub use text::{MAX_TEXT_CHARS, TextMessage, chunk_text};

/// Value of the `messaging_product` field on every request.
pub const MESSAGING_PRODUCT: &str = "whatsapp";

/// Recipient type for one-to-one conversations.
pub const RECIPIENT_INDIVIDUAL: &str = "individual";

/// A message ready to be built into wire payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundMessage {
    /// Plain text, chunked when longer than [`MAX_TEXT_CHARS`]
    Text(TextMessage),
    /// Emoji reaction to an earlier message
    Reaction {
        /// Message being reacted to
        message_id: String,
        /// Emoji, forwarded without validation
        emoji: String,
    },
    /// Pre-approved template
    Template(Template),
    /// Image by link or media id
    Image(ImageMessage),
    /// Document by link or media id
    Document(DocumentMessage),
    /// List-style interactive message with a caller-defined action
    InteractiveButton(ButtonMessage),
    /// Single-section list message
    InteractiveList(ListMessage),
    /// Caller-built interactive object, forwarded as-is
    InteractiveReplyButton(Value),
    /// Button opening a URL
    CtaUrlButton(CtaUrlButton),
    /// Request for the recipient's location
    LocationRequest(LocationRequest),
    /// Read receipt for a received message; addressed by message id only
    ReadReceipt {
        /// Message to mark as read
        message_id: String,
    },
}

impl OutboundMessage {
    /// Creates a text message with default options.
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        Self::Text(TextMessage::new(body))
    }

    /// Creates a text message replying to `message_id`.
    #[must_use]
    pub fn reply(message_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Text(TextMessage::new(body).reply_to(message_id))
    }

    /// Creates a reaction.
    #[must_use]
    pub fn reaction(message_id: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self::Reaction {
            message_id: message_id.into(),
            emoji: emoji.into(),
        }
    }

    /// Creates a read receipt.
    #[must_use]
    pub fn read_receipt(message_id: impl Into<String>) -> Self {
        Self::ReadReceipt {
            message_id: message_id.into(),
        }
    }

    /// Wire name of the message kind, as used in log output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Reaction { .. } => "reaction",
            Self::Template(_) => "template",
            Self::Image(_) => "image",
            Self::Document(_) => "document",
            Self::InteractiveButton(_)
            | Self::InteractiveList(_)
            | Self::InteractiveReplyButton(_)
            | Self::CtaUrlButton(_)
            | Self::LocationRequest(_) => "interactive",
            Self::ReadReceipt { .. } => "read_receipt",
        }
    }

    /// Builds the request payloads for sending this message to `to`.
    ///
    /// Returns one payload per request, in sending order. `to` is ignored
    /// for read receipts, which the provider addresses by message id.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a local precondition fails.
    pub fn build(&self, to: &str) -> Result<Vec<Value>, ValidationError> {
        let payload = match self {
            Self::Text(text) => return Ok(text.payloads(to)),
            Self::Reaction { message_id, emoji } => json!({
                "messaging_product": MESSAGING_PRODUCT,
                "recipient_type": RECIPIENT_INDIVIDUAL,
                "to": to,
                "type": "reaction",
                "reaction": {"message_id": message_id, "emoji": emoji},
            }),
            Self::Template(template) => template.payload(to),
            Self::Image(image) => image.payload(to),
            Self::Document(document) => document.payload(to),
            Self::InteractiveButton(button) => button.payload(to),
            Self::InteractiveList(list) => list.payload(to),
            Self::InteractiveReplyButton(interactive) => {
                interactive::reply_button_payload(to, interactive)
            }
            Self::CtaUrlButton(cta) => cta.payload(to),
            Self::LocationRequest(request) => request.payload(to)?,
            Self::ReadReceipt { message_id } => json!({
                "messaging_product": MESSAGING_PRODUCT,
                "status": "read",
                "message_id": message_id,
            }),
        };
        Ok(vec![payload])
    }
}

impl From<TextMessage> for OutboundMessage {
    fn from(message: TextMessage) -> Self {
        Self::Text(message)
    }
}

impl From<Template> for OutboundMessage {
    fn from(template: Template) -> Self {
        Self::Template(template)
    }
}

impl From<ImageMessage> for OutboundMessage {
    fn from(image: ImageMessage) -> Self {
        Self::Image(image)
    }
}

impl From<DocumentMessage> for OutboundMessage {
    fn from(document: DocumentMessage) -> Self {
        Self::Document(document)
    }
}

impl From<ButtonMessage> for OutboundMessage {
    fn from(button: ButtonMessage) -> Self {
        Self::InteractiveButton(button)
    }
}

impl From<ListMessage> for OutboundMessage {
    fn from(list: ListMessage) -> Self {
        Self::InteractiveList(list)
    }
}

impl From<CtaUrlButton> for OutboundMessage {
    fn from(cta: CtaUrlButton) -> Self {
        Self::CtaUrlButton(cta)
    }
}

impl From<LocationRequest> for OutboundMessage {
    fn from(request: LocationRequest) -> Self {
        Self::LocationRequest(request)
    }
}
