//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::client::ClientConfig;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

const ACCESS_TOKEN_HINT: &str = "Use --access-token or set api.access_token in config file";
const PHONE_NUMBER_ID_HINT: &str = "Use --phone-number-id or set api.phone_number_id in config file";

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// Credentials are only required when the selected command talks to the
/// Graph API; for other commands they are validated if present.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Client configuration, present when credentials were supplied
    pub client: Option<ClientConfig>,

    /// Graph API base URL
    pub api_base_url: Url,

    /// Request timeout
    pub timeout: Duration,

    /// App secret for webhook signature verification
    pub app_secret: Option<String>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phone_number_id = self
            .client
            .as_ref()
            .map_or("none", ClientConfig::phone_number_id);

        write!(
            f,
            "Config {{ api_base_url: {}, phone_number_id: {}, timeout: {}s, app_secret: {} }}",
            self.api_base_url,
            phone_number_id,
            self.timeout.as_secs(),
            if self.app_secret.is_some() { "set" } else { "none" },
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The command needs credentials and `access_token` or `phone_number_id` is missing
    /// - The API base URL is invalid
    /// - The timeout is zero
    /// - The access token cannot be used as a header value
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let api = toml.map(|t| &t.api);

        let base_url = cli
            .api_base_url
            .as_deref()
            .or_else(|| api.and_then(|a| a.base_url.as_deref()))
            .unwrap_or(defaults::API_BASE_URL);
        let api_base_url = parse_base_url(base_url)?;

        let timeout = Self::resolve_timeout(cli, toml)?;

        let access_token = cli
            .access_token
            .as_deref()
            .or_else(|| api.and_then(|a| a.access_token.as_deref()));
        let phone_number_id = cli
            .phone_number_id
            .as_deref()
            .or_else(|| api.and_then(|a| a.phone_number_id.as_deref()));

        let client = match (access_token, phone_number_id) {
            (Some(token), Some(phone)) => Some(ClientConfig::new(token, phone, base_url)?),
            _ if cli.command.requires_credentials() => {
                return Err(missing_credential(access_token.is_none()));
            }
            _ => None,
        };

        let app_secret = cli
            .app_secret
            .clone()
            .or_else(|| toml.and_then(|t| t.webhook.app_secret.clone()));

        Ok(Self {
            client,
            api_base_url,
            timeout,
            app_secret,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Returns the client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if no credentials were configured.
    pub fn client_config(&self) -> Result<&ClientConfig, ConfigError> {
        self.client
            .as_ref()
            .ok_or_else(|| ConfigError::missing(field::ACCESS_TOKEN, ACCESS_TOKEN_HINT))
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.api.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_base_url(url: &str) -> Result<Url, ConfigError> {
    Url::parse(url.trim_end_matches('/')).map_err(|e| ConfigError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

const fn missing_credential(token_missing: bool) -> ConfigError {
    if token_missing {
        ConfigError::missing(field::ACCESS_TOKEN, ACCESS_TOKEN_HINT)
    } else {
        ConfigError::missing(field::PHONE_NUMBER_ID, PHONE_NUMBER_ID_HINT)
    }
}
