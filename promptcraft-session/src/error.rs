use promptcraft_api::{EnvelopeError, ErrorBody};
use reqwest::StatusCode;
use thiserror::Error;

/// Longest slice of a response body kept in an error.
const MAX_ERROR_BODY_LENGTH: usize = 500;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status {
        status: StatusCode,
        message: String,
        body: String,
    },

    #[error("Token refresh failed: {0}")]
    Refresh(String),

    #[error("Invalid response: {0}")]
    Envelope(#[from] EnvelopeError),
}

impl SessionError {
    /// Build the error for a non-2xx response, pulling the backend's reason
    /// out of the envelope when there is one.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = ErrorBody::parse(body)
            .and_then(|b| b.summary().map(str::to_string))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unexpected status")
                    .to_string()
            });
        SessionError::Status {
            status,
            message,
            body: truncate_body(body),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SessionError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
}

impl From<reqwest::Error> for SessionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SessionError::Timeout
        } else {
            SessionError::Network(err)
        }
    }
}

impl From<config::ConfigError> for SessionError {
    fn from(err: config::ConfigError) -> Self {
        SessionError::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_uses_envelope_message() {
        let err = SessionError::from_status(
            StatusCode::CONFLICT,
            r#"{"success":false,"message":"Email already registered"}"#,
        );
        assert_eq!(err.status(), Some(StatusCode::CONFLICT));
        assert_eq!(err.to_string(), "HTTP 409 Conflict: Email already registered");
    }

    #[test]
    fn status_error_without_envelope_uses_reason_phrase() {
        let err = SessionError::from_status(StatusCode::UNAUTHORIZED, "");
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "HTTP 401 Unauthorized: Unauthorized");
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "é".repeat(400);
        match SessionError::from_status(StatusCode::BAD_GATEWAY, &body) {
            SessionError::Status { body: kept, .. } => {
                assert!(kept.contains("truncated, 800 total bytes"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
