//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Graph API section
    #[serde(default)]
    pub api: ApiSection,

    /// Webhook verification section
    #[serde(default)]
    pub webhook: WebhookSection,
}

/// Graph API configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// Access token
    pub access_token: Option<String>,

    /// Business phone number id
    pub phone_number_id: Option<String>,

    /// Base URL including the version segment
    pub base_url: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

/// Webhook configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// App secret for signature verification
    pub app_secret: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# whatsapp-cloud Configuration File

[api]
# Graph API access token (required for sending)
# access_token = "EAAG..."

# Business phone number id messages are sent from (required for sending)
# phone_number_id = "106540352242922"

# Graph API base URL including the version segment
# base_url = "https://graph.facebook.com/v18.0"

# Request timeout in seconds (default: 30)
timeout = 30

[webhook]
# App secret used to verify the X-Hub-Signature-256 header of deliveries
# app_secret = "your-app-secret"
"#
    .to_string()
}
