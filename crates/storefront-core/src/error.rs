// ── Core error types ──
//
// User-facing errors from storefront-core. Consumers see the four
// failure classes of a remote call (unreachable, timed out, rejected
// with a status, unreadable payload), never raw transport errors.
// The `From<storefront_api::Error>` impl does the translation.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Remote call failures ─────────────────────────────────────────
    #[error("Cannot reach the backend: {reason}")]
    NetworkUnreachable { reason: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Backend returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Unreadable response: {message}")]
    ParseOrData { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Session errors ───────────────────────────────────────────────
    #[error("No signed-in user")]
    NotSignedIn,

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Short text suitable for an error banner.
    ///
    /// Timeouts get their own wording so a surface can tell "slow network"
    /// apart from "the request failed".
    pub fn user_message(&self) -> String {
        match self {
            Self::Timeout => "request timed out".into(),
            Self::NetworkUnreachable { .. } => "network unreachable".into(),
            Self::Http { status, message } => format!("load failed (HTTP {status}): {message}"),
            Self::ParseOrData { .. } => "load failed: unexpected response from server".into(),
            Self::Config { message } => format!("configuration error: {message}"),
            Self::NotSignedIn => "not signed in".into(),
            Self::Internal(message) => format!("load failed: {message}"),
        }
    }

    /// HTTP status code, when the backend answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<storefront_api::Error> for CoreError {
    fn from(err: storefront_api::Error) -> Self {
        use storefront_api::Error as ApiError;

        match err {
            ApiError::Timeout { .. } => CoreError::Timeout,
            ApiError::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() || e.is_request() {
                    CoreError::NetworkUnreachable {
                        reason: e.to_string(),
                    }
                } else if let Some(status) = e.status() {
                    CoreError::Http {
                        status: status.as_u16(),
                        message: e.to_string(),
                    }
                } else if e.is_decode() || e.is_body() {
                    CoreError::ParseOrData {
                        message: e.to_string(),
                    }
                } else {
                    CoreError::NetworkUnreachable {
                        reason: e.to_string(),
                    }
                }
            }
            ApiError::Tls(reason) => CoreError::NetworkUnreachable {
                reason: format!("TLS error: {reason}"),
            },
            ApiError::Authentication { message } => CoreError::Http {
                status: 401,
                message,
            },
            ApiError::Http {
                status, message, ..
            } => CoreError::Http { status, message },
            ApiError::Deserialization { message, body: _ } => CoreError::ParseOrData { message },
            ApiError::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_is_distinct() {
        assert_eq!(CoreError::Timeout.user_message(), "request timed out");
        let generic = CoreError::Http {
            status: 500,
            message: "boom".into(),
        };
        assert_ne!(generic.user_message(), CoreError::Timeout.user_message());
        assert_eq!(generic.status(), Some(500));
    }

    #[test]
    fn api_errors_map_to_taxonomy() {
        let err: CoreError = storefront_api::Error::Timeout { timeout_secs: 30 }.into();
        assert_eq!(err, CoreError::Timeout);

        let err: CoreError = storefront_api::Error::Http {
            status: 503,
            message: "down".into(),
            code: None,
        }
        .into();
        assert_eq!(err.status(), Some(503));

        let err: CoreError = storefront_api::Error::Deserialization {
            message: "expected string".into(),
            body: "[]".into(),
        }
        .into();
        assert!(matches!(err, CoreError::ParseOrData { .. }));

        let err: CoreError = storefront_api::Error::Authentication {
            message: "bad key".into(),
        }
        .into();
        assert_eq!(err.status(), Some(401));
    }
}
