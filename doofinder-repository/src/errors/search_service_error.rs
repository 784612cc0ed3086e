//! Search service error types.
//!
//! This module defines the error types that can occur while calling the
//! remote search service.

use thiserror::Error;

/// Errors that can occur during search service operations.
#[derive(Error, Debug)]
pub enum SearchServiceError {
    /// Failed to reach the service.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request did not complete within its timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize a request body.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The client configuration is unusable.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A request parameter was rejected before sending.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl SearchServiceError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an HTTP status error.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::HttpError {
            status,
            body: body.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Status code for HTTP errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SearchServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else if err.is_builder() {
            Self::SerializationError(err.to_string())
        } else if let Some(status) = err.status() {
            Self::http(status.as_u16(), err.to_string())
        } else {
            Self::ConnectionError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SearchServiceError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = SearchServiceError::http(404, "index not found");
        assert_eq!(err.to_string(), "HTTP 404: index not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_non_http_errors_have_no_status() {
        assert_eq!(SearchServiceError::connection("refused").status(), None);
        assert_eq!(SearchServiceError::parse("bad json").status(), None);
    }
}
