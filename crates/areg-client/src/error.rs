//! API client error types.
//!
//! Every failure maps onto one [`ErrorKind`]:
//!
//! | Kind | Source | Handling |
//! |------|--------|----------|
//! | `Authentication` | `401` on any call | session already cleared, login redirect emitted |
//! | `Validation` | other `4xx` | surface to the form, keep the draft |
//! | `NotFound` | `404` | show an empty / failed-load state |
//! | `Transient` | transport error, `5xx`, bad body | generic failure, no retry here |

/// Errors from register API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The server rejected the session token. The session has been cleared.
    #[error("{endpoint} rejected the session; log in again")]
    Unauthorized { endpoint: String },
    /// The addressed resource does not exist.
    #[error("{endpoint} returned 404 Not Found")]
    NotFound { endpoint: String },
    /// The server returned another non-2xx status.
    #[error("{endpoint} returned {status}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        /// `message` from a JSON error body, or the raw body.
        message: String,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

/// Coarse classification used to decide how a failure is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Session rejected; handled centrally.
    Authentication,
    /// Request refused as invalid.
    Validation,
    /// Resource missing.
    NotFound,
    /// Network or server trouble.
    Transient,
}

impl ApiError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Authentication,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Api { status, .. } if (400..500).contains(status) => ErrorKind::Validation,
            Self::Config(_) => ErrorKind::Validation,
            Self::Api { .. } | Self::Http { .. } | Self::Deserialization { .. } => {
                ErrorKind::Transient
            }
        }
    }

    /// A message fit for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            Self::Unauthorized { .. } => "Your session has expired. Please log in again.".into(),
            Self::NotFound { .. } => "Record not found.".into(),
            _ => "Something went wrong. Please try again.".into(),
        }
    }
}

/// Pull a human message out of an error body: `{"message": "..."}` when the
/// server sent one, else the trimmed body itself.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16) -> ApiError {
        ApiError::Api {
            endpoint: "POST /records".into(),
            status,
            message: String::new(),
            body: String::new(),
        }
    }

    #[test]
    fn classifies_statuses() {
        assert_eq!(api(422).kind(), ErrorKind::Validation);
        assert_eq!(api(409).kind(), ErrorKind::Validation);
        assert_eq!(api(503).kind(), ErrorKind::Transient);
        assert_eq!(
            ApiError::Unauthorized { endpoint: "x".into() }.kind(),
            ErrorKind::Authentication
        );
        assert_eq!(
            ApiError::NotFound { endpoint: "x".into() }.kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn extracts_json_message() {
        assert_eq!(error_message(r#"{"message":"Email already in use"}"#), "Email already in use");
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(error_message(r#"{"error":"x"}"#), r#"{"error":"x"}"#);
    }

    #[test]
    fn user_message_prefers_server_text() {
        let err = ApiError::Api {
            endpoint: "POST /auth/register".into(),
            status: 400,
            message: "Email already in use".into(),
            body: String::new(),
        };
        assert_eq!(err.user_message(), "Email already in use");
        assert_eq!(api(500).user_message(), "Something went wrong. Please try again.");
    }
}
