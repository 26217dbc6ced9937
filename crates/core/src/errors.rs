use thiserror::Error;

/// Unified error type for the entire budget-tracker-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Insight and chart computations never produce errors; only I/O,
/// configuration and client-side validation do.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not authenticated: log in first")]
    NotAuthenticated,

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Configuration / File I/O ────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return CoreError::Deserialization(sanitize_url_message(&e.to_string()));
        }
        CoreError::Network(sanitize_url_message(&e.to_string()))
    }
}

/// Strip query parameters from any URL embedded in an error message.
/// Query strings may carry search terms or user identifiers.
pub(crate) fn sanitize_url_message(msg: &str) -> String {
    match msg.find('?') {
        Some(idx) => format!("{}?<query redacted>", &msg[..idx]),
        None => msg.to_string(),
    }
}
