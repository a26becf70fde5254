//! Error types for Fortnox API operations.

use thiserror::Error;

/// Message carried by a not-found error before a resource attaches context.
pub(crate) const NOT_FOUND_MESSAGE: &str = "Object not found";

/// Errors that can occur during Fortnox API operations.
#[derive(Debug, Error)]
pub enum FortnoxError {
    /// Configuration is missing or incomplete.
    #[error("Fortnox configuration required: {0}")]
    ConfigMissing(String),

    /// A configured value cannot be sent as an HTTP header.
    #[error("Invalid header value for {0}")]
    InvalidHeader(String),

    /// Caller supplied an argument the API cannot accept.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The server answered 404 to a GET or PUT.
    #[error("{message}")]
    ObjectNotFound { message: String },

    /// API request failed with a non-success status.
    #[error("Fortnox API error ({status_code}): {message}")]
    ApiError { message: String, status_code: u16 },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// A successful response did not have the expected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl FortnoxError {
    /// Not-found error without resource context.
    pub(crate) fn not_found() -> Self {
        FortnoxError::ObjectNotFound {
            message: NOT_FOUND_MESSAGE.to_string(),
        }
    }

    /// Replace the message of a not-found error; other errors pass through.
    pub(crate) fn describe_not_found(self, message: impl Into<String>) -> Self {
        match self {
            FortnoxError::ObjectNotFound { .. } => FortnoxError::ObjectNotFound {
                message: message.into(),
            },
            other => other,
        }
    }

    /// Returns true if the server reported the object as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FortnoxError::ObjectNotFound { .. })
    }

    /// HTTP status code behind this error, if the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FortnoxError::ObjectNotFound { .. } => Some(404),
            FortnoxError::ApiError { status_code, .. } => Some(*status_code),
            FortnoxError::RateLimited { .. } => Some(429),
            FortnoxError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for Fortnox operations.
pub type Result<T> = core::result::Result<T, FortnoxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_not_found_replaces_message() {
        let err = FortnoxError::not_found()
            .describe_not_found("Unable to find Financial year with id: 5");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Unable to find Financial year with id: 5");
    }

    #[test]
    fn test_describe_not_found_leaves_other_errors() {
        let err = FortnoxError::ApiError {
            message: "Bad request".to_string(),
            status_code: 400,
        }
        .describe_not_found("ignored");
        assert!(!err.is_not_found());
        assert_eq!(err.status_code(), Some(400));
        assert!(err.to_string().contains("Bad request"));
    }
}
