//! Error types for the agent directory client.

use thiserror::Error;

/// Message the directory backend sends back when a like is repeated.
pub const ALREADY_LIKED_MESSAGE: &str = "You have already liked this agent";

/// Error code attached to duplicate-action conflicts.
pub const ALREADY_LIKED_CODE: &str = "ALREADY_LIKED";

/// Main error type for the agent directory client.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error (connection, timeout, unreadable body)
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A collection fetch was requested while another one is still running
    #[error("A fetch of the agent collection is already in flight")]
    FetchInFlight,

    /// Directory API error
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    /// The API error, if the service answered with one.
    #[must_use]
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(api) => Some(api),
            _ => None,
        }
    }
}

/// Typed errors returned by the directory API.
///
/// Each variant corresponds to a specific error category from the API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No valid session (401).
    #[error("[{code}] {message}")]
    Authentication {
        code: String,
        message: String,
        request_id: Option<String>,
    },

    /// Session present but not allowed (403).
    #[error("[{code}] {message}")]
    Authorization {
        code: String,
        message: String,
        request_id: Option<String>,
    },

    /// Unknown or removed resource (404).
    #[error("[{code}] {message}")]
    NotFound {
        code: String,
        message: String,
        request_id: Option<String>,
    },

    /// Duplicate action, e.g. liking an agent twice (409, or the 400 the
    /// backend uses for repeated likes).
    #[error("[{code}] {message}")]
    Conflict {
        code: String,
        message: String,
        request_id: Option<String>,
    },

    /// Rate limited (429).
    #[error("[{code}] {message} (retry after {retry_after}s)")]
    RateLimited {
        code: String,
        message: String,
        retry_after: u32,
        request_id: Option<String>,
    },

    /// Rejected request (400 and other 4xx).
    #[error("[{code}] {message}")]
    Validation {
        code: String,
        message: String,
        request_id: Option<String>,
    },

    /// Server failure (5xx).
    #[error("[{code}] {message}")]
    Server {
        code: String,
        message: String,
        request_id: Option<String>,
    },
}

impl ApiError {
    /// Get the error code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Authentication { code, .. }
            | Self::Authorization { code, .. }
            | Self::NotFound { code, .. }
            | Self::Conflict { code, .. }
            | Self::RateLimited { code, .. }
            | Self::Validation { code, .. }
            | Self::Server { code, .. } => code,
        }
    }

    /// Get the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Authentication { message, .. }
            | Self::Authorization { message, .. }
            | Self::NotFound { message, .. }
            | Self::Conflict { message, .. }
            | Self::RateLimited { message, .. }
            | Self::Validation { message, .. }
            | Self::Server { message, .. } => message,
        }
    }

    /// Get the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Authentication { request_id, .. }
            | Self::Authorization { request_id, .. }
            | Self::NotFound { request_id, .. }
            | Self::Conflict { request_id, .. }
            | Self::RateLimited { request_id, .. }
            | Self::Validation { request_id, .. }
            | Self::Server { request_id, .. } => request_id.as_deref(),
        }
    }

    /// Get the retry-after value for rate limited errors.
    #[must_use]
    pub fn retry_after(&self) -> Option<u32> {
        match self {
            Self::RateLimited { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }

    /// Check if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Server { .. })
    }

    /// The caller already performed this action.
    #[must_use]
    pub fn is_duplicate_action(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// The caller must sign in before retrying.
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::Authorization { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_accessors() {
        let error = ApiError::Authentication {
            code: "UNAUTHORIZED".to_string(),
            message: "Not authenticated".to_string(),
            request_id: Some("req-123".to_string()),
        };

        assert_eq!(error.code(), "UNAUTHORIZED");
        assert_eq!(error.message(), "Not authenticated");
        assert_eq!(error.request_id(), Some("req-123"));
        assert!(error.requires_auth());
        assert!(!error.is_duplicate_action());
    }

    #[test]
    fn test_rate_limited_error() {
        let error = ApiError::RateLimited {
            code: "RATE_LIMITED".to_string(),
            message: "Too many requests".to_string(),
            retry_after: 30,
            request_id: None,
        };

        assert_eq!(error.retry_after(), Some(30));
        assert!(error.is_retryable());
        assert_eq!(
            error.to_string(),
            "[RATE_LIMITED] Too many requests (retry after 30s)"
        );
    }

    #[test]
    fn test_conflict_is_duplicate_and_not_retryable() {
        let error = ApiError::Conflict {
            code: ALREADY_LIKED_CODE.to_string(),
            message: ALREADY_LIKED_MESSAGE.to_string(),
            request_id: None,
        };

        assert!(error.is_duplicate_action());
        assert!(!error.is_retryable());
        assert!(!error.requires_auth());
    }

    #[test]
    fn test_error_api_accessor() {
        let error = Error::from(ApiError::NotFound {
            code: "NOT_FOUND".to_string(),
            message: "Agent not found".to_string(),
            request_id: None,
        });
        assert_eq!(error.api().map(ApiError::code), Some("NOT_FOUND"));

        assert!(Error::FetchInFlight.api().is_none());
    }
}
