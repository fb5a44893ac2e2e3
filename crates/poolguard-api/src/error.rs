use thiserror::Error;

/// Top-level error type for the `poolguard-api` crate.
///
/// Covers both remote surfaces: the PostgREST-style table store and the
/// `generateContent` advisory API. `poolguard-core` maps these into
/// connectivity or advisory failures.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Key rejected or malformed (HTTP 401/403, or unusable header value).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Table store ─────────────────────────────────────────────────
    /// Structured error from the table store (`{message, code}` body).
    #[error("Table store error (HTTP {status}): {message}")]
    Store {
        message: String,
        code: Option<String>,
        status: u16,
    },

    // ── Advisory API ────────────────────────────────────────────────
    /// Error returned by the language-model API.
    #[error("Advisory API error (HTTP {status}): {message}")]
    Advisory { message: String, status: u16 },

    /// The model answered but produced no text candidates.
    #[error("Advisory API returned no text")]
    EmptyCompletion,

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Extract the store error code (e.g. `"PGRST116"`, `"23505"`), if available.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Store { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
