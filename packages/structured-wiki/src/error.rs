//! Typed errors for the structured-wiki client.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors produced by viewer-level operations.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Query rejected before any network call was attempted
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A gateway operation failed
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

impl ViewerError {
    /// Map this error to the single message shown to the user.
    ///
    /// Transport failures and backend failures get distinct wording, and
    /// well-known HTTP statuses get status-specific text.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput { reason } => reason.clone(),
            Self::Gateway(GatewayError::Unavailable(_)) => {
                "The article service is unavailable.".to_string()
            }
            Self::Gateway(GatewayError::Request { status }) => match *status {
                404 => "Article not found.".to_string(),
                400 => "The article service rejected the request.".to_string(),
                s if s >= 500 => {
                    format!("The article service hit an internal error (HTTP {}).", s)
                }
                s => format!("The article service returned HTTP {}.", s),
            },
            Self::Gateway(GatewayError::Decode(_)) => {
                "Received an invalid response from the article service.".to_string()
            }
        }
    }
}

/// Errors that can occur during gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network or connection failure reaching the backend
    #[error("backend unavailable: {0}")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Backend reachable but returned a non-success HTTP status
    #[error("backend returned HTTP {status}")]
    Request { status: u16 },

    /// Response body was not valid JSON for the expected record shape
    #[error("failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors loading or resolving the shell's configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file was not valid JSON or is missing required fields
    #[error("failed to parse config file: {0}")]
    Parse(#[source] serde_json::Error),

    /// Resolved backend address is not a valid URL
    #[error("invalid backend base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

/// Result type alias for viewer operations.
pub type ViewerResult<T> = std::result::Result<T, ViewerError>;

/// Result type alias for gateway operations.
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_for_statuses() {
        let not_found = ViewerError::Gateway(GatewayError::Request { status: 404 });
        assert_eq!(not_found.user_message(), "Article not found.");

        let server_error = ViewerError::Gateway(GatewayError::Request { status: 503 });
        assert!(server_error.user_message().contains("503"));

        let teapot = ViewerError::Gateway(GatewayError::Request { status: 418 });
        assert!(teapot.user_message().contains("418"));
    }

    #[test]
    fn test_user_message_for_unavailable() {
        let err = ViewerError::Gateway(GatewayError::Unavailable(Box::new(
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        )));
        assert_eq!(err.user_message(), "The article service is unavailable.");
    }

    #[test]
    fn test_user_message_for_decode() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = ViewerError::Gateway(GatewayError::Decode(json_err));
        assert!(err.user_message().contains("invalid response"));
    }
}
