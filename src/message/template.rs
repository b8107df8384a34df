//! Pre-approved template messages.

use std::fmt::Display;

use serde_json::{Value, json};

use super::MESSAGING_PRODUCT;

/// Language code used when the caller does not pick one.
pub const DEFAULT_TEMPLATE_LANGUAGE: &str = "en_US";

/// A template message.
///
/// `components` is forwarded verbatim: its shape is defined by the
/// template registered with the provider, not by this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Registered template name
    pub name: String,
    /// Language code, e.g. `en_US`
    pub language: String,
    /// Header/body/button parameter blocks
    pub components: Vec<Value>,
}

impl Template {
    /// Creates a template with no components in the default language.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: DEFAULT_TEMPLATE_LANGUAGE.to_string(),
            components: Vec::new(),
        }
    }

    /// Creates a template whose body placeholders are filled, in order,
    /// with `variables`.
    #[must_use]
    pub fn with_body_text<I>(name: impl Into<String>, variables: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        Self::new(name).with_components(vec![text_component("body", variables)])
    }

    /// Creates a template with a header and a body component, each filled
    /// with text parameters.
    ///
    /// Always yields exactly two components, even when either list is empty.
    #[must_use]
    pub fn with_header_and_body_text<H, B>(
        name: impl Into<String>,
        header_variables: H,
        body_variables: B,
    ) -> Self
    where
        H: IntoIterator,
        H::Item: Display,
        B: IntoIterator,
        B::Item: Display,
    {
        Self::new(name).with_components(vec![
            text_component("header", header_variables),
            text_component("body", body_variables),
        ])
    }

    /// Sets the language code.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Replaces the components.
    #[must_use]
    pub fn with_components(mut self, components: Vec<Value>) -> Self {
        self.components = components;
        self
    }

    pub(super) fn payload(&self, to: &str) -> Value {
        json!({
            "messaging_product": MESSAGING_PRODUCT,
            "to": to,
            "type": "template",
            "template": {
                "name": self.name,
                "language": {"code": self.language},
                "components": self.components,
            },
        })
    }
}

/// Wraps each variable as a `{"type": "text", "text": ...}` parameter.
#[must_use]
pub fn text_parameters<I>(variables: I) -> Vec<Value>
where
    I: IntoIterator,
    I::Item: Display,
{
    variables
        .into_iter()
        .map(|variable| json!({"type": "text", "text": variable.to_string()}))
        .collect()
}

fn text_component<I>(kind: &str, variables: I) -> Value
where
    I: IntoIterator,
    I::Item: Display,
{
    json!({"type": kind, "parameters": text_parameters(variables)})
}
