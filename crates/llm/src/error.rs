//! Failure classification for remote generation calls.

use ragnarok_core::AppError;
use thiserror::Error;

/// Error returned by an [`LlmClient`](crate::LlmClient).
///
/// Each variant is a distinguishable condition so callers can decide how to
/// present it: the answer synthesizer shows the raw body for decode and shape
/// failures, and the status for HTTP errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// The request never produced an HTTP response (connect, TLS, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not valid JSON.
    #[error("invalid JSON in response: {message}")]
    Decode { message: String, body: String },

    /// Valid JSON, but not the shape the provider promises.
    #[error("unexpected response shape: {0}")]
    UnexpectedResponse(String),

    /// The client could not be built from its settings.
    #[error("configuration error: {0}")]
    Config(String),
}

impl LlmError {
    /// HTTP status code, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body, when one was received.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } | Self::Decode { body, .. } => Some(body),
            Self::UnexpectedResponse(body) => Some(body),
            _ => None,
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Config(msg) => AppError::Config(msg),
            other => AppError::Generation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = LlmError::Status {
            status: 503,
            body: "Model is currently loading".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP status 503: Model is currently loading");
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.raw_body(), Some("Model is currently loading"));
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = LlmError::Transport("connection refused".to_string()).into();
        assert!(matches!(app, AppError::Generation(ref m) if m.contains("connection refused")));

        let app: AppError = LlmError::Config("missing token".to_string()).into();
        assert!(matches!(app, AppError::Config(_)));
    }
}
