// ── Core error types ──
//
// User-facing errors from poolguard-core. Consumers never see HTTP status
// codes or JSON parse failures directly. The `From<poolguard_api::Error>`
// impl translates store-side failures into connectivity errors; advisory
// calls are mapped explicitly through `CoreError::advisory`.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Remote store ─────────────────────────────────────────────────
    /// The table store could not be reached or refused the request.
    #[error("Cannot reach the table store: {reason}")]
    Connectivity {
        reason: String,
        /// HTTP status, when the store answered at all.
        status: Option<u16>,
    },

    /// The store rejected the configured key.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Advisory ─────────────────────────────────────────────────────
    /// The language-model call failed or produced nothing usable.
    #[error("Advisory request failed: {message}")]
    Advisory {
        message: String,
        /// `true` when the model answered with no text at all.
        empty: bool,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Map an advisory-side transport error.
    pub fn advisory(err: poolguard_api::Error) -> Self {
        match err {
            poolguard_api::Error::EmptyCompletion => Self::Advisory {
                message: "the model returned no text".into(),
                empty: true,
            },
            other => Self::Advisory {
                message: other.to_string(),
                empty: false,
            },
        }
    }

    /// `true` when the store could not be reached or refused the key.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            Self::Connectivity { .. } | Self::AuthenticationFailed { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<poolguard_api::Error> for CoreError {
    fn from(err: poolguard_api::Error) -> Self {
        match err {
            poolguard_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            poolguard_api::Error::Transport(ref e) => CoreError::Connectivity {
                reason: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            },
            poolguard_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            poolguard_api::Error::Timeout { timeout_secs } => CoreError::Connectivity {
                reason: format!("request timed out after {timeout_secs}s"),
                status: None,
            },
            poolguard_api::Error::Tls(msg) => CoreError::Connectivity {
                reason: format!("TLS error: {msg}"),
                status: None,
            },
            poolguard_api::Error::Store {
                message,
                code,
                status,
            } => CoreError::Connectivity {
                reason: match code {
                    Some(code) => format!("{message} ({code})"),
                    None => message,
                },
                status: Some(status),
            },
            poolguard_api::Error::Advisory { message, .. } => CoreError::Advisory {
                message,
                empty: false,
            },
            poolguard_api::Error::EmptyCompletion => CoreError::Advisory {
                message: "the model returned no text".into(),
                empty: true,
            },
            poolguard_api::Error::Deserialization { message, body: _ } => CoreError::Connectivity {
                reason: format!("unexpected response shape: {message}"),
                status: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_become_connectivity() {
        let err: CoreError = poolguard_api::Error::Store {
            message: "relation does not exist".into(),
            code: Some("42P01".into()),
            status: 404,
        }
        .into();

        assert!(err.is_connectivity());
        assert!(err.to_string().contains("42P01"));
    }

    #[test]
    fn rejected_key_counts_as_connectivity() {
        let err: CoreError = poolguard_api::Error::Authentication {
            message: "HTTP 401".into(),
        }
        .into();
        assert!(err.is_connectivity());
    }

    #[test]
    fn empty_completion_is_flagged() {
        let err = CoreError::advisory(poolguard_api::Error::EmptyCompletion);
        assert!(matches!(err, CoreError::Advisory { empty: true, .. }));
        assert!(!err.is_connectivity());
    }
}
