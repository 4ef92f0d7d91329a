// ── Core error types ──
//
// Errors raised while driving a resource operation. The
// `From<jumpcloud_api::Error>` impl classifies transport-layer failures so
// controllers can tell "not found" and "unparseable response" apart from
// other API failures before turning them into diagnostics.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API errors ───────────────────────────────────────────────────
    #[error("{entity} with id {id} not found")]
    NotFound { entity: String, id: String },

    #[error("status: {status}, body: {body}")]
    Api { status: u16, body: String },

    #[error("Cannot reach the JumpCloud API: {reason}")]
    ConnectionFailed { reason: String },

    /// The API call succeeded but its response could not be decoded.
    #[error("API succeeded but the response could not be decoded: {message}")]
    Decode { message: String, body: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Operation not supported: {operation}")]
    Unsupported { operation: String },

    #[error("Invalid {document} document: {message}")]
    State { document: String, message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(#[from] jumpcloud_config::ConfigError),

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Translate an API error for a request about `entity` / `id`.
    pub fn from_api(err: jumpcloud_api::Error, entity: &str, id: &str) -> Self {
        if err.is_not_found() {
            return Self::NotFound {
                entity: entity.into(),
                id: id.into(),
            };
        }
        err.into()
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<jumpcloud_api::Error> for CoreError {
    fn from(err: jumpcloud_api::Error) -> Self {
        match err {
            jumpcloud_api::Error::Api { status, body } => CoreError::Api { status, body },
            jumpcloud_api::Error::Transport(ref e) => match e.status() {
                Some(status) => CoreError::Api {
                    status: status.as_u16(),
                    body: e.to_string(),
                },
                None => CoreError::ConnectionFailed {
                    reason: e.to_string(),
                },
            },
            jumpcloud_api::Error::Deserialization { message, body } => {
                CoreError::Decode { message, body }
            }
            jumpcloud_api::Error::InvalidApiKey { message } => CoreError::Internal(message),
            jumpcloud_api::Error::InvalidUrl(e) => CoreError::Internal(format!("Invalid URL: {e}")),
            jumpcloud_api::Error::ClientBuild(msg) => CoreError::ConnectionFailed { reason: msg },
            jumpcloud_api::Error::Serialization(e) => {
                CoreError::Internal(format!("Failed to encode request body: {e}"))
            }
        }
    }
}
