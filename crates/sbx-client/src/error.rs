//! Error types for talking to the analysis service.

use thiserror::Error;

/// Errors that can occur during a request to the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The service could not be reached or the connection broke.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    ///
    /// `message` is extracted from the error body and shown verbatim.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,

    /// A success response did not have the expected shape.
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// The client could not be built from its configuration.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Returns a user-friendly error message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => {
                "Could not reach the analysis service. Check that it is running.".to_string()
            }
            Self::Status { message, .. } => message.clone(),
            Self::Timeout => "The analysis service did not respond in time.".to_string(),
            Self::JsonParse(_) => "The analysis service sent an unexpected response.".to_string(),
            Self::InvalidConfig(detail) => format!("Client configuration is invalid: {detail}"),
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout => true,
            Self::Status { status, .. } => *status >= 500,
            Self::JsonParse(_) | Self::InvalidConfig(_) => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::JsonParse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_displays_service_message_verbatim() {
        let err = ClientError::Status {
            status: 400,
            message: "bad constant".to_string(),
        };
        assert_eq!(err.to_string(), "bad constant");
        assert_eq!(err.user_message(), "bad constant");
    }

    #[test]
    fn test_user_messages() {
        let err = ClientError::Network("connection refused".to_string());
        assert!(err.user_message().contains("analysis service"));
        assert!(ClientError::Timeout.user_message().contains("in time"));
    }

    #[test]
    fn test_retryable() {
        assert!(ClientError::Network("reset".to_string()).is_retryable());
        assert!(ClientError::Timeout.is_retryable());
        assert!(
            ClientError::Status {
                status: 503,
                message: "busy".to_string()
            }
            .is_retryable()
        );
        assert!(
            !ClientError::Status {
                status: 422,
                message: "S-box must be 16x16".to_string()
            }
            .is_retryable()
        );
        assert!(!ClientError::JsonParse("eof".to_string()).is_retryable());
    }
}
