//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// whatsapp-cloud: WhatsApp Cloud API client
///
/// Sends messages through the WhatsApp Cloud API and inspects
/// webhook deliveries.
#[derive(Debug, Parser)]
#[command(name = "whatsapp-cloud")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Graph API access token
    #[arg(long = "access-token", global = true)]
    pub access_token: Option<String>,

    /// Business phone number id that messages are sent from
    #[arg(long = "phone-number-id", global = true)]
    pub phone_number_id: Option<String>,

    /// Graph API base URL including the version segment
    #[arg(long = "api-base-url", global = true)]
    pub api_base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// App secret used to verify webhook signatures
    #[arg(long = "app-secret", global = true)]
    pub app_secret: Option<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for whatsapp-cloud
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },

    /// Send a text message, split into several when longer than 4096 characters
    SendText {
        /// Recipient phone number
        #[arg(long)]
        to: String,
        /// Message text
        #[arg(long)]
        body: String,
        /// Id of the message to reply to
        #[arg(long = "reply-to", value_name = "MESSAGE_ID")]
        reply_to: Option<String>,
        /// Disable link previews
        #[arg(long = "no-preview")]
        no_preview: bool,
    },

    /// React to a message with an emoji
    React {
        /// Recipient phone number
        #[arg(long)]
        to: String,
        /// Id of the message to react to
        #[arg(long = "message-id")]
        message_id: String,
        /// Reaction emoji
        #[arg(long)]
        emoji: String,
    },

    /// Send an image by link or media id
    SendImage {
        /// Recipient phone number
        #[arg(long)]
        to: String,
        /// Image URL, or media id with --media-id
        #[arg(long)]
        image: String,
        /// Treat --image as an uploaded media id
        #[arg(long = "media-id")]
        media_id: bool,
        /// Image caption
        #[arg(long)]
        caption: Option<String>,
    },

    /// Send a document by link or media id
    SendDocument {
        /// Recipient phone number
        #[arg(long)]
        to: String,
        /// Document URL, or media id with --media-id
        #[arg(long)]
        document: String,
        /// Treat --document as an uploaded media id
        #[arg(long = "media-id")]
        media_id: bool,
        /// Document caption
        #[arg(long)]
        caption: Option<String>,
        /// File name shown to the recipient
        #[arg(long)]
        filename: Option<String>,
    },

    /// Send a pre-approved template
    SendTemplate {
        /// Recipient phone number
        #[arg(long)]
        to: String,
        /// Template name
        #[arg(long)]
        name: String,
        /// Template language code
        #[arg(long, default_value = defaults::TEMPLATE_LANGUAGE)]
        lang: String,
        /// Header text variable (can be specified multiple times)
        #[arg(long = "header-var", value_name = "VALUE")]
        header_vars: Vec<String>,
        /// Body text variable (can be specified multiple times)
        #[arg(long = "body-var", value_name = "VALUE")]
        body_vars: Vec<String>,
    },

    /// Send a button that opens a URL
    SendCtaUrl {
        /// Recipient phone number
        #[arg(long)]
        to: String,
        /// Button label
        #[arg(long = "display-text")]
        display_text: String,
        /// URL opened by the button
        #[arg(long)]
        url: String,
        /// Message body shown above the button
        #[arg(long)]
        body: Option<String>,
    },

    /// Ask the recipient to share their location
    RequestLocation {
        /// Recipient phone number
        #[arg(long)]
        to: String,
        /// Prompt text, at most 1024 characters
        #[arg(long)]
        body: String,
    },

    /// Mark a received message as read
    MarkRead {
        /// Id of the received message
        #[arg(long = "message-id")]
        message_id: String,
    },

    /// Download media from a provider media URL
    DownloadMedia {
        /// Media URL returned by the provider
        #[arg(long)]
        url: String,
        /// MIME type of the media; its subtype becomes the file extension
        #[arg(long = "mime-type")]
        mime_type: String,
        /// Output file path without extension
        #[arg(long, short, value_name = "STEM")]
        output: Option<PathBuf>,
    },

    /// Print the fields extracted from a webhook delivery
    InspectWebhook {
        /// File holding the raw delivery body
        file: PathBuf,
        /// Value of the X-Hub-Signature-256 header
        #[arg(long, value_name = "sha256=HEX")]
        signature: Option<String>,
    },
}

impl Command {
    /// Returns true if the command talks to the Graph API.
    #[must_use]
    pub const fn requires_credentials(&self) -> bool {
        !matches!(self, Self::Init { .. } | Self::InspectWebhook { .. })
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
