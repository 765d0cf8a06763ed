//! Client error types

use super::ApiRequest;
use serde_json::Value;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Backend rejected the credentials (401)
    ///
    /// When produced by the gateway, `request` is the request that failed
    /// with its auth failure already marked handled.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        message: String,
        request: Option<Box<ApiRequest>>,
    },

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed {
                message,
                request: None,
            },
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// HTTP status behind this error, if there was a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::AuthenticationFailed { .. } => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::ServerError { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Serialization(_) | Self::Configuration(_) => None,
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. })
    }

    /// Next attempt of the request that hit a 401, carrying the handled flag
    pub fn retry_request(&self) -> Option<ApiRequest> {
        match self {
            Self::AuthenticationFailed {
                request: Some(request),
                ..
            } => Some(request.retry()),
            _ => None,
        }
    }

    /// Raw response body for status errors
    fn body(&self) -> Option<&str> {
        match self {
            Self::BadRequest(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::AuthenticationFailed { message, .. }
            | Self::ServerError { message, .. } => Some(message),
            _ => None,
        }
    }

    /// The `message` field of a JSON error body, if the backend sent one
    pub fn backend_message(&self) -> Option<String> {
        let body: Value = serde_json::from_str(self.body()?).ok()?;
        body.get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .map(str::to_string)
    }

    /// Text to show the user: the backend's message, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message()
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status() {
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_REQUEST, "bad".into()),
            ClientError::BadRequest(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, "no".into()),
            ClientError::AuthenticationFailed { request: None, .. }
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::FORBIDDEN, "no".into()),
            ClientError::Forbidden(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::NOT_FOUND, "gone".into()),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_GATEWAY, "down".into()),
            ClientError::ServerError { status: 502, .. }
        ));
    }

    #[test]
    fn test_status_codes() {
        let err = ClientError::from_status(StatusCode::UNAUTHORIZED, String::new());
        assert_eq!(err.status(), Some(401));
        assert!(err.is_auth_failure());
        assert_eq!(ClientError::Configuration("x".into()).status(), None);
    }

    #[test]
    fn test_user_message_prefers_backend_message() {
        let err = ClientError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Email already registered"}"#.into(),
        );
        assert_eq!(err.backend_message().as_deref(), Some("Email already registered"));
        assert_eq!(
            err.user_message("Registration failed. Please try again."),
            "Email already registered"
        );
    }

    #[test]
    fn test_user_message_falls_back() {
        for body in ["Internal Server Error", "", r#"{"error":"nope"}"#, r#"{"message":""}"#] {
            let err = ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, body.into());
            assert_eq!(err.user_message("Failed to create voucher"), "Failed to create voucher");
        }

        let err = ClientError::Configuration("base_url is required".into());
        assert_eq!(err.user_message("fallback"), "fallback");
    }

    #[test]
    fn test_retry_request_only_for_gateway_auth_failures() {
        let err = ClientError::from_status(StatusCode::UNAUTHORIZED, String::new());
        assert!(err.retry_request().is_none());

        let err = ClientError::AuthenticationFailed {
            message: String::new(),
            request: Some(Box::new(ApiRequest::get("/campaigns").mark_auth_failure_handled())),
        };
        let retry = err.retry_request().unwrap();
        assert_eq!(retry.attempt(), 2);
        assert!(retry.is_auth_failure_handled());
    }
}
