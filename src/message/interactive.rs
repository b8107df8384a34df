//! Interactive messages: buttons, lists, URL actions and location requests.

use serde_json::{Value, json};

use super::{MESSAGING_PRODUCT, RECIPIENT_INDIVIDUAL, ValidationError};

/// Maximum number of characters in a location request body.
pub const MAX_LOCATION_REQUEST_CHARS: usize = 1024;

/// Default label of the button that opens a list message.
pub const DEFAULT_LIST_BUTTON: &str = "Choose";

/// Default title of the single section of a list message.
pub const DEFAULT_LIST_SECTION: &str = "Select one";

/// A list-style interactive message with a caller-defined action block.
///
/// The action is forwarded verbatim so any section layout the provider
/// supports can be expressed. For the common single-section case use
/// [`ListMessage`].
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonMessage {
    /// Optional header text
    pub header: Option<String>,
    /// Optional body text
    pub body: Option<String>,
    /// Optional footer text
    pub footer: Option<String>,
    /// Action block, forwarded as-is
    pub action: Value,
}

impl ButtonMessage {
    /// Creates a message with only an action block.
    #[must_use]
    pub const fn new(action: Value) -> Self {
        Self {
            header: None,
            body: None,
            footer: None,
            action,
        }
    }

    /// Sets the header text.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Sets the body text.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the footer text.
    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// The `interactive` object for this message.
    #[must_use]
    pub fn interactive(&self) -> Value {
        let mut interactive = json!({"type": "list", "action": self.action});
        decorate(
            &mut interactive,
            self.header.as_deref(),
            self.body.as_deref(),
            self.footer.as_deref(),
        );
        interactive
    }

    pub(super) fn payload(&self, to: &str) -> Value {
        interactive_payload(to, None, self.interactive())
    }
}

/// One selectable row of a [`ListMessage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOption {
    /// Identifier echoed back in the list reply
    pub payload: String,
    /// Row title shown to the user
    pub title: String,
}

impl ListOption {
    /// Creates a list row.
    #[must_use]
    pub fn new(payload: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            title: title.into(),
        }
    }
}

/// A list message whose options are grouped into a single named section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMessage {
    /// Optional header text
    pub header: Option<String>,
    /// Body text
    pub body: String,
    /// Optional footer text
    pub footer: Option<String>,
    /// Label of the button that opens the list
    pub button: String,
    /// Title of the section holding the options
    pub section_title: String,
    /// Rows, in display order
    pub options: Vec<ListOption>,
}

impl ListMessage {
    /// Creates a list message with the default button label and section title.
    #[must_use]
    pub fn new(body: impl Into<String>, options: Vec<ListOption>) -> Self {
        Self {
            header: None,
            body: body.into(),
            footer: None,
            button: DEFAULT_LIST_BUTTON.to_string(),
            section_title: DEFAULT_LIST_SECTION.to_string(),
            options,
        }
    }

    /// Sets the header text.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Sets the footer text.
    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Sets the label of the button that opens the list.
    #[must_use]
    pub fn with_button(mut self, button: impl Into<String>) -> Self {
        self.button = button.into();
        self
    }

    /// Sets the section title.
    #[must_use]
    pub fn with_section_title(mut self, title: impl Into<String>) -> Self {
        self.section_title = title.into();
        self
    }

    pub(super) fn payload(&self, to: &str) -> Value {
        let rows: Vec<Value> = self
            .options
            .iter()
            .map(|option| json!({"id": option.payload, "title": option.title}))
            .collect();

        let mut interactive = json!({
            "type": "list",
            "action": {
                "button": self.button,
                "sections": [{"title": self.section_title, "rows": rows}],
            },
        });
        decorate(
            &mut interactive,
            self.header.as_deref(),
            Some(self.body.as_str()),
            self.footer.as_deref(),
        );
        interactive_payload(to, None, interactive)
    }
}

/// Builds a `type: "button"` interactive object from `(id, title)` pairs.
///
/// The provider rejects more than three reply buttons; that limit is left
/// to the provider.
#[must_use]
pub fn reply_buttons<I, S, T>(body: &str, buttons: I) -> Value
where
    I: IntoIterator<Item = (S, T)>,
    S: Into<String>,
    T: Into<String>,
{
    let buttons: Vec<Value> = buttons
        .into_iter()
        .map(|(id, title)| {
            json!({"type": "reply", "reply": {"id": id.into(), "title": title.into()}})
        })
        .collect();

    json!({
        "type": "button",
        "body": {"text": body},
        "action": {"buttons": buttons},
    })
}

pub(super) fn reply_button_payload(to: &str, interactive: &Value) -> Value {
    interactive_payload(to, Some(RECIPIENT_INDIVIDUAL), interactive.clone())
}

/// A call-to-action button that opens a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtaUrlButton {
    /// Optional body text above the button
    pub body: Option<String>,
    /// Button label
    pub display_text: String,
    /// Target URL
    pub url: String,
}

impl CtaUrlButton {
    /// Creates a URL button without body text.
    #[must_use]
    pub fn new(display_text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            body: None,
            display_text: display_text.into(),
            url: url.into(),
        }
    }

    /// Sets the body text.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub(super) fn payload(&self, to: &str) -> Value {
        let mut interactive = json!({
            "type": "cta_url",
            "action": {
                "name": "cta_url",
                "parameters": {"display_text": self.display_text, "url": self.url},
            },
        });
        decorate(&mut interactive, None, self.body.as_deref(), None);
        interactive_payload(to, Some(RECIPIENT_INDIVIDUAL), interactive)
    }
}

/// A request for the recipient to share their location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRequest {
    /// Prompt shown above the send-location button
    pub body: String,
}

impl LocationRequest {
    /// Creates a location request.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Checks the body length limit.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::LocationRequestTooLong`] when the body
    /// exceeds [`MAX_LOCATION_REQUEST_CHARS`] characters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let length = self.body.chars().count();
        if length > MAX_LOCATION_REQUEST_CHARS {
            return Err(ValidationError::LocationRequestTooLong {
                length,
                max: MAX_LOCATION_REQUEST_CHARS,
            });
        }
        Ok(())
    }

    pub(super) fn payload(&self, to: &str) -> Result<Value, ValidationError> {
        self.validate()?;
        Ok(interactive_payload(
            to,
            Some(RECIPIENT_INDIVIDUAL),
            json!({
                "type": "location_request_message",
                "body": {"text": self.body},
                "action": {"name": "send_location"},
            }),
        ))
    }
}

fn decorate(
    interactive: &mut Value,
    header: Option<&str>,
    body: Option<&str>,
    footer: Option<&str>,
) {
    if let Some(header) = header {
        interactive["header"] = json!({"type": "text", "text": header});
    }
    if let Some(body) = body {
        interactive["body"] = json!({"text": body});
    }
    if let Some(footer) = footer {
        interactive["footer"] = json!({"text": footer});
    }
}

fn interactive_payload(to: &str, recipient_type: Option<&str>, interactive: Value) -> Value {
    let mut payload = json!({
        "messaging_product": MESSAGING_PRODUCT,
        "to": to,
        "type": "interactive",
        "interactive": interactive,
    });
    if let Some(recipient_type) = recipient_type {
        payload["recipient_type"] = Value::from(recipient_type);
    }
    payload
}
