//! Image and document messages.

use serde_json::{Map, Value, json};

use super::{MESSAGING_PRODUCT, RECIPIENT_INDIVIDUAL};

/// Where the provider fetches media from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// Publicly reachable URL
    Link(String),
    /// Identifier returned by an earlier media upload
    Id(String),
}

impl MediaSource {
    /// Interprets `value` as a link when `is_link` is true, otherwise as
    /// an uploaded media identifier.
    #[must_use]
    pub fn new(value: impl Into<String>, is_link: bool) -> Self {
        if is_link {
            Self::Link(value.into())
        } else {
            Self::Id(value.into())
        }
    }

    fn insert_into(&self, object: &mut Map<String, Value>) {
        let (key, value) = match self {
            Self::Link(link) => ("link", link),
            Self::Id(id) => ("id", id),
        };
        object.insert(key.to_string(), Value::String(value.clone()));
    }
}

/// An image message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMessage {
    /// Image location
    pub source: MediaSource,
    /// Optional caption
    pub caption: Option<String>,
}

impl ImageMessage {
    /// Creates an image message without a caption.
    #[must_use]
    pub const fn new(source: MediaSource) -> Self {
        Self {
            source,
            caption: None,
        }
    }

    /// Sets the caption.
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub(super) fn payload(&self, to: &str) -> Value {
        let mut image = Map::new();
        self.source.insert_into(&mut image);
        insert_optional(&mut image, "caption", self.caption.as_deref());
        media_payload(to, "image", image)
    }
}

/// A document message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMessage {
    /// Document location
    pub source: MediaSource,
    /// Optional caption
    pub caption: Option<String>,
    /// File name shown to the recipient
    pub filename: Option<String>,
}

impl DocumentMessage {
    /// Creates a document message without caption or file name.
    #[must_use]
    pub const fn new(source: MediaSource) -> Self {
        Self {
            source,
            caption: None,
            filename: None,
        }
    }

    /// Sets the caption.
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Sets the file name.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub(super) fn payload(&self, to: &str) -> Value {
        let mut document = Map::new();
        self.source.insert_into(&mut document);
        insert_optional(&mut document, "caption", self.caption.as_deref());
        insert_optional(&mut document, "filename", self.filename.as_deref());
        media_payload(to, "document", document)
    }
}

fn insert_optional(object: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        object.insert(key.to_string(), Value::String(value.to_string()));
    }
}

fn media_payload(to: &str, kind: &str, media: Map<String, Value>) -> Value {
    let mut payload = json!({
        "messaging_product": MESSAGING_PRODUCT,
        "recipient_type": RECIPIENT_INDIVIDUAL,
        "to": to,
        "type": kind,
    });
    payload[kind] = Value::Object(media);
    payload
}
