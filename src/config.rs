//! Client configuration.
//!
//! Holds the credentials and static header values sent with every request.
//! A [`Config`] is owned by the [`FortnoxClient`](crate::FortnoxClient) that
//! was built from it, so clients with different credentials never share
//! state.

use std::env;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};

use crate::error::{FortnoxError, Result};

/// Default Fortnox API base URL.
pub const DEFAULT_API_URL: &str = "https://api.fortnox.se/3";

const JSON_MEDIA_TYPE: &str = "application/json";

const ACCESS_TOKEN_HEADER: &str = "Access-Token";
const CLIENT_SECRET_HEADER: &str = "Client-Secret";

/// Credentials and headers for the Fortnox API.
///
/// # Example
///
/// ```
/// use fortnox::Config;
///
/// let config = Config::new("access-token", "client-secret")
///     .with_base_url("http://localhost:8080/3");
/// assert_eq!(config.content_type(), "application/json");
/// ```
#[derive(Clone)]
pub struct Config {
    access_token: String,
    client_secret: String,
    content_type: String,
    accept: String,
    base_url: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("content_type", &self.content_type)
            .field("accept", &self.accept)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Create a configuration with the given credentials and default headers.
    pub fn new(access_token: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            client_secret: client_secret.into(),
            content_type: JSON_MEDIA_TYPE.to_string(),
            accept: JSON_MEDIA_TYPE.to_string(),
            base_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// Reads `FORTNOX_ACCESS_TOKEN` and `FORTNOX_CLIENT_SECRET`, and
    /// optionally `FORTNOX_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if either credential variable is not set.
    pub fn from_env() -> Result<Self> {
        let access_token = env::var("FORTNOX_ACCESS_TOKEN").map_err(|_| {
            FortnoxError::ConfigMissing(
                "FORTNOX_ACCESS_TOKEN environment variable not set".to_string(),
            )
        })?;
        let client_secret = env::var("FORTNOX_CLIENT_SECRET").map_err(|_| {
            FortnoxError::ConfigMissing(
                "FORTNOX_CLIENT_SECRET environment variable not set".to_string(),
            )
        })?;

        let config = Self::new(access_token, client_secret);
        Ok(match env::var("FORTNOX_API_URL") {
            Ok(url) => config.with_base_url(url),
            Err(_) => config,
        })
    }

    /// Override the base URL (useful for sandboxes and tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the `Content-Type` header value.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Override the `Accept` header value.
    #[must_use]
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = accept.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn accept(&self) -> &str {
        &self.accept
    }

    /// Build the four headers attached to every request.
    ///
    /// # Errors
    ///
    /// Returns an error if a value contains characters not allowed in
    /// HTTP headers.
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(4);
        headers.insert(
            HeaderName::from_static("access-token"),
            header_value(ACCESS_TOKEN_HEADER, &self.access_token, true)?,
        );
        headers.insert(
            HeaderName::from_static("client-secret"),
            header_value(CLIENT_SECRET_HEADER, &self.client_secret, true)?,
        );
        headers.insert(CONTENT_TYPE, header_value("Content-Type", &self.content_type, false)?);
        headers.insert(ACCEPT, header_value("Accept", &self.accept, false)?);
        Ok(headers)
    }
}

fn header_value(name: &str, value: &str, sensitive: bool) -> Result<HeaderValue> {
    let mut value =
        HeaderValue::from_str(value).map_err(|_| FortnoxError::InvalidHeader(name.to_string()))?;
    value.set_sensitive(sensitive);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::new("access-token", "client-secret");
        assert_eq!(config.base_url(), DEFAULT_API_URL);
        assert_eq!(config.content_type(), "application/json");
        assert_eq!(config.accept(), "application/json");
    }

    #[test]
    fn test_config_headers() {
        let headers = Config::new("access-token", "client-secret").headers().unwrap();
        assert_eq!(headers.len(), 4);
        assert_eq!(headers["Access-Token"], "access-token");
        assert_eq!(headers["Client-Secret"], "client-secret");
        assert_eq!(headers["Content-Type"], "application/json");
        assert_eq!(headers["Accept"], "application/json");
    }

    #[test]
    fn test_config_debug_hides_credentials() {
        let debug = format!("{:?}", Config::new("secret-token", "secret-value"));
        assert!(debug.contains("Config"));
        assert!(!debug.contains("secret-token"));
        assert!(!debug.contains("secret-value"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = Config::new("a", "b").with_base_url("http://localhost:1234/3/");
        assert_eq!(config.base_url(), "http://localhost:1234/3");
    }

    #[test]
    fn test_invalid_header_value() {
        let err = Config::new("bad\ntoken", "b").headers().unwrap_err();
        assert!(matches!(err, FortnoxError::InvalidHeader(name) if name == "Access-Token"));
    }
}
