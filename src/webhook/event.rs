//! Field extraction from webhook deliveries.

use serde::Serialize;
use serde_json::Value;

use super::WebhookError;

const CHANGE_VALUE_PATH: &str = "entry[0].changes[0].value";

/// A webhook delivery from the provider.
///
/// Construction checks that `entry[0].changes[0].value` (the change value)
/// exists. After that every accessor is total: a missing key anywhere below
/// the change value yields `None`. The event is never mutated, so calling
/// an accessor twice returns the same result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEvent {
    raw: Value,
}

impl WebhookEvent {
    /// Wraps an already parsed delivery.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Malformed`] if the change value is absent
    /// or is not an object.
    pub fn new(raw: Value) -> Result<Self, WebhookError> {
        if !raw
            .pointer("/entry/0/changes/0/value")
            .is_some_and(Value::is_object)
        {
            return Err(WebhookError::Malformed {
                path: CHANGE_VALUE_PATH,
            });
        }
        Ok(Self { raw })
    }

    /// Parses a delivery from its raw body.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidJson`] for a non-JSON body and
    /// [`WebhookError::Malformed`] as for [`WebhookEvent::new`].
    pub fn from_slice(body: &[u8]) -> Result<Self, WebhookError> {
        Self::new(serde_json::from_slice(body)?)
    }

    /// The delivery exactly as received.
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.raw
    }

    /// The change value, `entry[0].changes[0].value`.
    #[must_use]
    pub fn change_value(&self) -> &Value {
        &self.raw["entry"][0]["changes"][0]["value"]
    }

    fn str_at(&self, pointer: &str) -> Option<&str> {
        self.change_value().pointer(pointer)?.as_str()
    }

    /// The `field` discriminator of the change, e.g. `"messages"`.
    #[must_use]
    pub fn changed_field(&self) -> Option<&str> {
        self.raw.pointer("/entry/0/changes/0/field")?.as_str()
    }

    /// True if the change value carries a `messages` key.
    #[must_use]
    pub fn is_message(&self) -> bool {
        self.change_value().get("messages").is_some()
    }

    /// WhatsApp id of the sender.
    #[must_use]
    pub fn sender_id(&self) -> Option<&str> {
        self.str_at("/contacts/0/wa_id")
    }

    /// Profile name of the sender.
    #[must_use]
    pub fn sender_name(&self) -> Option<&str> {
        self.str_at("/contacts/0/profile/name")
    }

    /// Id of the first message.
    #[must_use]
    pub fn message_id(&self) -> Option<&str> {
        self.str_at("/messages/0/id")
    }

    /// Timestamp of the first message, as sent by the provider.
    #[must_use]
    pub fn message_timestamp(&self) -> Option<&str> {
        self.str_at("/messages/0/timestamp")
    }

    /// Type of the first message, e.g. `"text"` or `"image"`.
    #[must_use]
    pub fn message_type(&self) -> Option<&str> {
        self.str_at("/messages/0/type")
    }

    /// Text of the first message.
    ///
    /// Only text messages and interactive button replies have text here.
    /// List replies, media and everything else yield `None` even though
    /// the raw data is available through the other accessors.
    #[must_use]
    pub fn message_text(&self) -> Option<&str> {
        match self.message_type()? {
            "text" => self.str_at("/messages/0/text/body"),
            "interactive" => self.str_at("/messages/0/interactive/button_reply/title"),
            _ => None,
        }
    }

    /// Raw `interactive` block of the first message.
    #[must_use]
    pub fn interactive_response(&self) -> Option<&Value> {
        self.change_value().pointer("/messages/0/interactive")
    }

    /// Raw `image` block of the first message.
    #[must_use]
    pub fn image_info(&self) -> Option<&Value> {
        self.change_value().pointer("/messages/0/image")
    }

    /// Delivery status of a status callback, e.g. `"delivered"`.
    #[must_use]
    pub fn delivery_status(&self) -> Option<&str> {
        self.str_at("/statuses/0/status")
    }

    /// Conversation id, from the change value or from the first status.
    #[must_use]
    pub fn conversation_id(&self) -> Option<&str> {
        self.str_at("/conversation_id")
            .or_else(|| self.str_at("/statuses/0/conversation/id"))
    }

    /// Collects every extracted field into one serializable value.
    #[must_use]
    pub fn summary(&self) -> WebhookSummary<'_> {
        WebhookSummary {
            field: self.changed_field(),
            is_message: self.is_message(),
            sender_id: self.sender_id(),
            sender_name: self.sender_name(),
            message_id: self.message_id(),
            message_timestamp: self.message_timestamp(),
            message_type: self.message_type(),
            message_text: self.message_text(),
            interactive: self.interactive_response(),
            image: self.image_info(),
            delivery_status: self.delivery_status(),
            conversation_id: self.conversation_id(),
        }
    }
}

impl TryFrom<Value> for WebhookEvent {
    type Error = WebhookError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

/// Snapshot of all fields a [`WebhookEvent`] exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookSummary<'a> {
    /// Change discriminator
    pub field: Option<&'a str>,
    /// Whether the event carries messages
    pub is_message: bool,
    /// Sender WhatsApp id
    pub sender_id: Option<&'a str>,
    /// Sender profile name
    pub sender_name: Option<&'a str>,
    /// First message id
    pub message_id: Option<&'a str>,
    /// First message timestamp
    pub message_timestamp: Option<&'a str>,
    /// First message type
    pub message_type: Option<&'a str>,
    /// First message text
    pub message_text: Option<&'a str>,
    /// Raw interactive block
    pub interactive: Option<&'a Value>,
    /// Raw image block
    pub image: Option<&'a Value>,
    /// Delivery status
    pub delivery_status: Option<&'a str>,
    /// Conversation id
    pub conversation_id: Option<&'a str>,
}
