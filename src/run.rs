//! Application execution logic.
//!
//! This module turns a parsed subcommand into client calls and prints
//! the outcome as pretty JSON on stdout.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use url::Url;

use whatsapp_cloud::client::{MediaError, SendError, SendResult, WhatsAppClient};
use whatsapp_cloud::config::{Command, ConfigError, ValidatedConfig};
use whatsapp_cloud::message::{
    CtaUrlButton, DocumentMessage, ImageMessage, LocationRequest, MediaSource, OutboundMessage,
    Template, TextMessage,
};
use whatsapp_cloud::transport::{HttpClient, HttpError, ReqwestClient};
use whatsapp_cloud::webhook::{WebhookError, WebhookEvent, WebhookSummary, verify_signature};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The command needs configuration that is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failed to build the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] HttpError),

    /// A send failed before the provider answered.
    #[error("Send failed: {0}")]
    Send(#[from] SendError),

    /// A media download failed.
    #[error("Media download failed: {0}")]
    Media(#[from] MediaError),

    /// The media URL could not be parsed.
    #[error("Invalid media URL '{url}': {reason}")]
    InvalidMediaUrl {
        /// The rejected URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// Failed to read a webhook delivery file.
    #[error("Failed to read webhook delivery '{}': {source}", path.display())]
    ReadDelivery {
        /// Path to the delivery file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The webhook delivery could not be parsed.
    #[error("Invalid webhook delivery: {0}")]
    Webhook(#[from] WebhookError),

    /// The delivery does not match its signature.
    #[error("Webhook signature does not match the payload")]
    InvalidSignature,

    /// Failed to serialize the output.
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    /// Failed to write the output.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl RunError {
    /// Returns true if the error stems from configuration rather than execution.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// How a successfully executed command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command finished and the provider, if called, accepted it.
    Completed,
    /// The provider answered with a non-200 status.
    Rejected,
}

/// Output of `inspect-webhook`.
#[derive(Debug, Serialize)]
struct InspectReport<'a> {
    /// `None` when no signature was checked
    signature_verified: Option<bool>,
    #[serde(flatten)]
    summary: WebhookSummary<'a>,
}

/// Executes `command` against the Graph API, printing to stdout.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created or the command fails.
pub async fn execute(command: Command, config: ValidatedConfig) -> Result<Outcome, RunError> {
    let http = ReqwestClient::with_timeout(config.timeout).map_err(RunError::HttpClient)?;
    execute_with(command, &config, http, &mut std::io::stdout()).await
}

/// Executes `command` through `http`, writing the result to `out`.
///
/// `init` is handled by the entry point before configuration is loaded and
/// is a no-op here.
///
/// # Errors
///
/// Returns an error if the command cannot be carried out. A non-200 answer
/// from the provider is not an error; it yields [`Outcome::Rejected`].
pub async fn execute_with<H, W>(
    command: Command,
    config: &ValidatedConfig,
    http: H,
    out: &mut W,
) -> Result<Outcome, RunError>
where
    H: HttpClient,
    W: Write + Send,
{
    if let Some((to, message)) = outbound_message(&command) {
        let client = client(http, config)?;
        let result = client.send(to, &message).await?;
        return report(&result, out);
    }

    match command {
        Command::MarkRead { message_id } => {
            let client = client(http, config)?;
            let result = client.mark_as_read(&message_id).await?;
            report(&result, out)
        }
        Command::DownloadMedia {
            url,
            mime_type,
            output,
        } => {
            let client = client(http, config)?;
            download_media(&client, &url, &mime_type, output.as_deref(), out).await
        }
        Command::InspectWebhook { file, signature } => {
            inspect_webhook(&file, signature.as_deref(), config.app_secret.as_deref(), out).await
        }
        _ => Ok(Outcome::Completed),
    }
}

/// Maps a send subcommand to its recipient and message.
fn outbound_message(command: &Command) -> Option<(&str, OutboundMessage)> {
    let (to, message): (&String, OutboundMessage) = match command {
        Command::SendText {
            to,
            body,
            reply_to,
            no_preview,
        } => {
            let mut text = TextMessage::new(body.as_str()).with_preview_url(!no_preview);
            if let Some(message_id) = reply_to {
                text = text.reply_to(message_id.as_str());
            }
            (to, text.into())
        }
        Command::React {
            to,
            message_id,
            emoji,
        } => (to, OutboundMessage::reaction(message_id.as_str(), emoji.as_str())),
        Command::SendImage {
            to,
            image,
            media_id,
            caption,
        } => {
            let mut message = ImageMessage::new(MediaSource::new(image.as_str(), !media_id));
            if let Some(caption) = caption {
                message = message.with_caption(caption.as_str());
            }
            (to, message.into())
        }
        Command::SendDocument {
            to,
            document,
            media_id,
            caption,
            filename,
        } => {
            let mut message = DocumentMessage::new(MediaSource::new(document.as_str(), !media_id));
            if let Some(caption) = caption {
                message = message.with_caption(caption.as_str());
            }
            if let Some(filename) = filename {
                message = message.with_filename(filename.as_str());
            }
            (to, message.into())
        }
        Command::SendTemplate {
            to,
            name,
            lang,
            header_vars,
            body_vars,
        } => (to, template(name, header_vars, body_vars).with_language(lang.as_str()).into()),
        Command::SendCtaUrl {
            to,
            display_text,
            url,
            body,
        } => {
            let mut cta = CtaUrlButton::new(display_text.as_str(), url.as_str());
            if let Some(body) = body {
                cta = cta.with_body(body.as_str());
            }
            (to, cta.into())
        }
        Command::RequestLocation { to, body } => (to, LocationRequest::new(body.as_str()).into()),
        _ => return None,
    };
    Some((to.as_str(), message))
}

fn template(name: &str, header_vars: &[String], body_vars: &[String]) -> Template {
    match (header_vars.is_empty(), body_vars.is_empty()) {
        (true, true) => Template::new(name),
        (true, false) => Template::with_body_text(name, body_vars),
        (false, _) => Template::with_header_and_body_text(name, header_vars, body_vars),
    }
}

fn client<H: HttpClient>(http: H, config: &ValidatedConfig) -> Result<WhatsAppClient<H>, RunError> {
    Ok(WhatsAppClient::new(http, config.client_config()?.clone()))
}

async fn download_media<H, W>(
    client: &WhatsAppClient<H>,
    url: &str,
    mime_type: &str,
    output: Option<&Path>,
    out: &mut W,
) -> Result<Outcome, RunError>
where
    H: HttpClient,
    W: Write + Send,
{
    let media_url = Url::parse(url).map_err(|e| RunError::InvalidMediaUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let path = client.download_media(media_url, mime_type, output).await?;
    write_json(out, &serde_json::json!({"path": path}))?;
    Ok(Outcome::Completed)
}

async fn inspect_webhook<W: Write + Send>(
    file: &Path,
    signature: Option<&str>,
    app_secret: Option<&str>,
    out: &mut W,
) -> Result<Outcome, RunError> {
    let body = tokio::fs::read(file)
        .await
        .map_err(|source| RunError::ReadDelivery {
            path: file.to_path_buf(),
            source,
        })?;

    let signature_verified = match (signature, app_secret) {
        (Some(signature), Some(secret)) => {
            if !verify_signature(&body, signature, secret) {
                return Err(RunError::InvalidSignature);
            }
            tracing::debug!("Webhook signature verified");
            Some(true)
        }
        (Some(_), None) => {
            tracing::warn!("No app secret configured, signature not checked");
            None
        }
        (None, _) => None,
    };

    let event = WebhookEvent::from_slice(&body)?;
    tracing::info!(
        field = event.changed_field(),
        is_message = event.is_message(),
        "Webhook delivery parsed"
    );

    write_json(
        out,
        &InspectReport {
            signature_verified,
            summary: event.summary(),
        },
    )?;
    Ok(Outcome::Completed)
}

fn report<W: Write>(result: &SendResult, out: &mut W) -> Result<Outcome, RunError> {
    write_json(out, result)?;
    if result.success {
        Ok(Outcome::Completed)
    } else {
        Ok(Outcome::Rejected)
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), RunError> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(out, "{json}")?;
    Ok(())
}
