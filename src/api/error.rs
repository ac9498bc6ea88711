//! Catalog API error types

use thiserror::Error;

/// Result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures talking to the catalog API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Request timed out: {message}")]
    Timeout { message: String },

    #[error("Invalid response from catalog API: {details}")]
    InvalidResponse { details: String },

    #[error("Invalid API URL: {message}")]
    InvalidUrl { message: String },
}

impl ApiError {
    /// Create a non-success status error
    pub fn status(status: u16) -> Self {
        ApiError::Status { status }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network {
            message: message.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(details: impl Into<String>) -> Self {
        ApiError::InvalidResponse {
            details: details.into(),
        }
    }

    /// Create an invalid URL error
    pub fn invalid_url(message: impl Into<String>) -> Self {
        ApiError::InvalidUrl {
            message: message.into(),
        }
    }

    /// HTTP status, when the server answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ApiError::Timeout {
                message: error.to_string(),
            }
        } else if error.is_decode() {
            ApiError::invalid_response(error.to_string())
        } else if let Some(status) = error.status() {
            ApiError::status(status.as_u16())
        } else {
            ApiError::network(error.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(error: url::ParseError) -> Self {
        ApiError::invalid_url(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_contains_code() {
        let error = ApiError::status(404);
        assert!(error.to_string().contains("404"));
        assert_eq!(error.status_code(), Some(404));
        assert_eq!(ApiError::network("refused").status_code(), None);
    }
}
