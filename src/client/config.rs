//! Immutable client configuration.

use std::fmt;

use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use url::Url;

use super::ClientConfigError;

/// Base URL of the Graph API version this crate targets.
pub const DEFAULT_API_BASE_URL: &str = "https://graph.facebook.com/v18.0";

/// Credentials and endpoint of one WhatsApp Business phone number.
///
/// The messages endpoint and the header set are derived once at
/// construction and shared by every send, including read receipts.
#[derive(Clone)]
pub struct ClientConfig {
    access_token: String,
    phone_number_id: String,
    api_base_url: Url,
    messages_url: Url,
    headers: HeaderMap,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_token", &"<redacted>")
            .field("phone_number_id", &self.phone_number_id)
            .field("api_base_url", &self.api_base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    /// Creates a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientConfigError`] when the token or phone number id is
    /// empty, the base URL cannot be parsed, or the token contains
    /// characters not allowed in an HTTP header.
    pub fn new(
        access_token: impl Into<String>,
        phone_number_id: impl Into<String>,
        api_base_url: &str,
    ) -> Result<Self, ClientConfigError> {
        let access_token = access_token.into();
        let phone_number_id = phone_number_id.into();

        if access_token.is_empty() {
            return Err(ClientConfigError::Missing("access_token"));
        }
        if phone_number_id.is_empty() {
            return Err(ClientConfigError::Missing("phone_number_id"));
        }

        let base = api_base_url.trim_end_matches('/');
        let invalid_url = |e: url::ParseError| ClientConfigError::InvalidUrl {
            url: api_base_url.to_string(),
            reason: e.to_string(),
        };
        let api_base_url = Url::parse(base).map_err(invalid_url)?;
        let messages_url =
            Url::parse(&format!("{base}/{phone_number_id}/messages")).map_err(invalid_url)?;

        let mut authorization = HeaderValue::from_str(&format!("Bearer {access_token}"))
            .map_err(|_| ClientConfigError::InvalidAccessToken)?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, authorization);

        Ok(Self {
            access_token,
            phone_number_id,
            api_base_url,
            messages_url,
            headers,
        })
    }

    /// Creates a configuration against [`DEFAULT_API_BASE_URL`].
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::new`].
    pub fn with_default_base_url(
        access_token: impl Into<String>,
        phone_number_id: impl Into<String>,
    ) -> Result<Self, ClientConfigError> {
        Self::new(access_token, phone_number_id, DEFAULT_API_BASE_URL)
    }

    /// The access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The WhatsApp Business phone number id.
    #[must_use]
    pub fn phone_number_id(&self) -> &str {
        &self.phone_number_id
    }

    /// The API base URL, without a trailing slash.
    #[must_use]
    pub const fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    /// `{api_base_url}/{phone_number_id}/messages`.
    #[must_use]
    pub const fn messages_url(&self) -> &Url {
        &self.messages_url
    }

    /// `Content-Type` and `Authorization` headers sent with every request.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
