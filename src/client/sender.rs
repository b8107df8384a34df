//! The messaging client.

use serde_json::Value;

use crate::message::{
    ButtonMessage, CtaUrlButton, DocumentMessage, ImageMessage, ListMessage, LocationRequest,
    OutboundMessage, Template, TextMessage,
};
use crate::transport::{HttpClient, HttpRequest};

use super::{ClientConfig, SendError, SendResult};

/// Client for the messages endpoint of one phone number.
///
/// Stateless apart from its immutable [`ClientConfig`]: every call builds
/// its payloads, posts them and returns. No retries, no caching.
///
/// # Type Parameters
///
/// - `H`: The transport, usually [`ReqwestClient`](crate::transport::ReqwestClient)
///
/// # Example
///
/// ```no_run
/// use whatsapp_cloud::client::{ClientConfig, WhatsAppClient};
/// use whatsapp_cloud::transport::ReqwestClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::with_default_base_url("EAAG...", "106540352242922")?;
/// let client = WhatsAppClient::new(ReqwestClient::new(), config);
///
/// let result = client.send_text("263771234567", "Hello").await?;
/// if !result.success {
///     eprintln!("Provider rejected the message: {:?}", result.provider_error);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WhatsAppClient<H> {
    http: H,
    config: ClientConfig,
}

impl<H> WhatsAppClient<H> {
    /// Creates a client sending through `http`.
    #[must_use]
    pub const fn new(http: H, config: ClientConfig) -> Self {
        Self { http, config }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(super) const fn http(&self) -> &H {
        &self.http
    }
}

impl<H: HttpClient> WhatsAppClient<H> {
    /// Sends `message` to `to`.
    ///
    /// Payloads are posted one at a time, in order. For chunked text the
    /// result of the last chunk is returned; earlier chunks that the
    /// provider rejected are only logged, so a success here does not mean
    /// every chunk was delivered.
    ///
    /// # Errors
    ///
    /// - [`SendError::Validation`] if the message fails a local check;
    ///   nothing is sent.
    /// - [`SendError::Transport`] if a request gets no response; remaining
    ///   chunks are not sent.
    pub async fn send(&self, to: &str, message: &OutboundMessage) -> Result<SendResult, SendError> {
        let payloads = message.build(to)?;
        tracing::info!(to, kind = message.kind(), requests = payloads.len(), "Sending message");

        let result = self.dispatch(&payloads).await?;
        if result.success {
            tracing::info!(to, kind = message.kind(), "Message sent");
        }
        Ok(result)
    }

    /// Posts `payloads` sequentially and returns the last result.
    async fn dispatch(&self, payloads: &[Value]) -> Result<SendResult, SendError> {
        let total = payloads.len();
        let mut last = None;

        for (index, payload) in payloads.iter().enumerate() {
            let result = self.post(payload).await?;
            if result.success {
                tracing::debug!(chunk = index + 1, of = total, "Request accepted");
            } else {
                tracing::warn!(
                    chunk = index + 1,
                    of = total,
                    status = result.http_status,
                    error = ?result.provider_error,
                    "Request rejected by provider"
                );
            }
            last = Some(result);
        }

        Ok(last.expect("build yields at least one payload"))
    }

    /// Posts a single payload to the messages endpoint.
    async fn post(&self, payload: &Value) -> Result<SendResult, SendError> {
        let request = HttpRequest::post(self.config.messages_url().clone())
            .with_headers(self.config.headers().clone())
            .with_json(payload)?;

        let response = self.http.request(request).await?;
        Ok(SendResult::from_response(&response))
    }

    /// Sends a text message, chunked when too long.
    ///
    /// # Errors
    ///
    /// See [`WhatsAppClient::send`].
    pub async fn send_text(&self, to: &str, body: &str) -> Result<SendResult, SendError> {
        self.send(to, &OutboundMessage::text(body)).await
    }

    /// Sends a text message with explicit options.
    ///
    /// # Errors
    ///
    /// See [`WhatsAppClient::send`].
    pub async fn send_text_message(
        &self,
        to: &str,
        message: TextMessage,
    ) -> Result<SendResult, SendError> {
        self.send(to, &message.into()).await
    }

    /// Replies to `message_id`; every chunk carries the reply context.
    ///
    /// # Errors
    ///
    /// See [`WhatsAppClient::send`].
    pub async fn reply_to_message(
        &self,
        message_id: &str,
        to: &str,
        body: &str,
    ) -> Result<SendResult, SendError> {
        self.send(to, &OutboundMessage::reply(message_id, body)).await
    }

    /// Reacts to `message_id` with `emoji`.
    ///
    /// # Errors
    ///
    /// See [`WhatsAppClient::send`].
    pub async fn send_reaction(
        &self,
        message_id: &str,
        emoji: &str,
        to: &str,
    ) -> Result<SendResult, SendError> {
        self.send(to, &OutboundMessage::reaction(message_id, emoji))
            .await
    }

    /// Sends a template message.
    ///
    /// # Errors
    ///
    /// See [`WhatsAppClient::send`].
    pub async fn send_template(
        &self,
        to: &str,
        template: Template,
    ) -> Result<SendResult, SendError> {
        self.send(to, &template.into()).await
    }

    /// Sends an image.
    ///
    /// # Errors
    ///
    /// See [`WhatsAppClient::send`].
    pub async fn send_image(&self, to: &str, image: ImageMessage) -> Result<SendResult, SendError> {
        self.send(to, &image.into()).await
    }

    /// Sends a document.
    ///
    /// # Errors
    ///
    /// See [`WhatsAppClient::send`].
    pub async fn send_document(
        &self,
        to: &str,
        document: DocumentMessage,
    ) -> Result<SendResult, SendError> {
        self.send(to, &document.into()).await
    }

    /// Sends a list-style message with a caller-defined action.
    ///
    /// # Errors
    ///
    /// See [`WhatsAppClient::send`].
    pub async fn send_button(
        &self,
        to: &str,
        button: ButtonMessage,
    ) -> Result<SendResult, SendError> {
        self.send(to, &button.into()).await
    }

    /// Sends a single-section list message.
    ///
    /// # Errors
    ///
    /// See [`WhatsAppClient::send`].
    pub async fn send_list_message(
        &self,
        to: &str,
        list: ListMessage,
    ) -> Result<SendResult, SendError> {
        self.send(to, &list.into()).await
    }

    /// Sends a caller-built interactive object as-is.
    ///
    /// # Errors
    ///
    /// See [`WhatsAppClient::send`].
    pub async fn send_reply_button(
        &self,
        to: &str,
        interactive: Value,
    ) -> Result<SendResult, SendError> {
        self.send(to, &OutboundMessage::InteractiveReplyButton(interactive))
            .await
    }

    /// Sends a button that opens a URL.
    ///
    /// # Errors
    ///
    /// See [`WhatsAppClient::send`].
    pub async fn send_cta_url_button(
        &self,
        to: &str,
        cta: CtaUrlButton,
    ) -> Result<SendResult, SendError> {
        self.send(to, &cta.into()).await
    }

    /// Asks the recipient to share their location.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::Validation`] without sending anything if
    /// `body` is longer than 1024 characters; otherwise see
    /// [`WhatsAppClient::send`].
    pub async fn request_location(&self, to: &str, body: &str) -> Result<SendResult, SendError> {
        self.send(to, &LocationRequest::new(body).into()).await
    }

    /// Marks a received message as read.
    ///
    /// # Errors
    ///
    /// See [`WhatsAppClient::send`].
    pub async fn mark_as_read(&self, message_id: &str) -> Result<SendResult, SendError> {
        tracing::info!(message_id, "Marking message as read");
        let payloads = OutboundMessage::read_receipt(message_id).build("")?;
        self.dispatch(&payloads).await
    }
}
