//! Fortnox API client.
//!
//! Low-level HTTP transport that handles authentication headers and raw
//! requests. Higher-level operations are implemented via traits on entity
//! types.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::error::{FortnoxError, Result};

const USER_AGENT: &str = concat!("fortnox/", env!("CARGO_PKG_VERSION"));

/// Low-level Fortnox API client.
///
/// Attaches the configured `Access-Token`, `Client-Secret`, `Content-Type`
/// and `Accept` headers to every request. Entity-specific operations are
/// implemented via the `Get`, `List`, `Create` and `Save` traits on model
/// types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool and configuration.
///
/// # Example
///
/// ```no_run
/// use fortnox::{Config, FortnoxClient};
///
/// # fn example() -> fortnox::Result<()> {
/// // Create from environment variables
/// let client = FortnoxClient::from_env()?;
///
/// // Or configure manually
/// let client = FortnoxClient::new(Config::new("access-token", "client-secret"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FortnoxClient {
    http: Client,
    config: Arc<Config>,
}

impl std::fmt::Debug for FortnoxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FortnoxClient")
            .field("base_url", &self.config.base_url())
            .finish_non_exhaustive()
    }
}

/// HTTP verbs understood by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    /// GET and PUT report 404 as a missing object; POST and DELETE do not.
    fn maps_not_found(self) -> bool {
        matches!(self, Verb::Get | Verb::Put)
    }
}

impl FortnoxClient {
    /// Create a client from environment variables.
    ///
    /// See [`Config::from_env`] for the variables read.
    ///
    /// # Errors
    ///
    /// Returns an error if a credential variable is not set.
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    /// Create a new client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid, a header value is not
    /// representable, or the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        Url::parse(config.base_url())?;
        config.headers()?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(FortnoxError::HttpError)?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Get the configuration this client sends with every request.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Resolve a target into an absolute URL.
    ///
    /// Targets starting with `http` are used verbatim; anything else is a
    /// path appended to the base URL.
    pub fn resolve(&self, target: &str) -> Result<Url> {
        if target.starts_with("http") {
            return Ok(Url::parse(target)?);
        }
        let url = if target.starts_with('/') {
            format!("{}{}", self.config.base_url(), target)
        } else {
            format!("{}/{}", self.config.base_url(), target)
        };
        Ok(Url::parse(&url)?)
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, target: &str) -> Result<Value> {
        let url = self.resolve(target)?;
        tracing::debug!(%url, "GET");

        self.send(Verb::Get, self.http.get(url)).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        target: &str,
        query: &Q,
    ) -> Result<Value> {
        let url = self.resolve(target)?;
        tracing::debug!(%url, query = %serde_json::to_string(query)?, "GET");

        let request = self.http.get(url).query(query);
        self.send(Verb::Get, request).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, target: &str, body: &B) -> Result<Value> {
        let url = self.resolve(target)?;
        tracing::debug!(%url, body = %serde_json::to_string(body)?, "POST");

        let request = self.http.post(url).json(body);
        self.send(Verb::Post, request).await
    }

    /// Make a PUT request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, target: &str, body: &B) -> Result<Value> {
        let url = self.resolve(target)?;
        tracing::debug!(%url, body = %serde_json::to_string(body)?, "PUT");

        let request = self.http.put(url).json(body);
        self.send(Verb::Put, request).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, target: &str) -> Result<()> {
        let url = self.resolve(target)?;
        tracing::debug!(%url, "DELETE");

        self.send(Verb::Delete, self.http.delete(url)).await?;
        Ok(())
    }

    /// Attach headers, execute, check the status and parse the body.
    async fn send(&self, verb: Verb, request: RequestBuilder) -> Result<Value> {
        let response = request
            .headers(self.config.headers()?)
            .send()
            .await
            .map_err(FortnoxError::HttpError)?;

        let response = Self::check_response(verb, response).await?;
        let body = response.text().await.map_err(FortnoxError::HttpError)?;
        tracing::debug!(response = %body, "{verb:?} response");

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Check response status and convert errors.
    async fn check_response(verb: Verb, response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND && verb.maps_not_found() {
            return Err(FortnoxError::not_found());
        }

        // Handle rate limiting
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(FortnoxError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        tracing::debug!(status = status.as_u16(), %message, "{verb:?} failed");
        Err(FortnoxError::ApiError {
            message,
            status_code: status.as_u16(),
        })
    }

    /// Extract error message from a failed response.
    ///
    /// Fortnox reports failures as
    /// `{"ErrorInformation": {"error": 1, "message": "...", "code": 2000204}}`.
    async fn extract_error_message(response: Response, status: StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        if let Ok(json) = serde_json::from_str::<Value>(&body) {
            let info = json.get("ErrorInformation").unwrap_or(&json);
            for key in ["message", "Message"] {
                if let Some(msg) = info.get(key).and_then(|m| m.as_str()) {
                    return msg.to_string();
                }
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}
