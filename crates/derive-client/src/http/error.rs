/*
[INPUT]:  Error sources (HTTP, websocket, JSON-RPC, validation, signing)
[OUTPUT]: Structured error types with a coarse kind for callers
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or changing error classification
*/

use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Main error type for the Derive client
#[derive(Error, Debug)]
pub enum DeriveError {
    /// Payload was missing a field, had a wrong type, or broke a record invariant
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Private operation attempted without a valid session
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Lookup by identifier found nothing
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// HTTP transport failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Websocket transport failed
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// Exchange returned a JSON-RPC error
    #[error("Derive RPC error (code {code}): {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<String>,
    },

    /// Non-JSON response with an unexpected HTTP status
    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// A channel subscription was rejected
    #[error("Subscription to {channel} failed: {error}")]
    Subscription { channel: String, error: String },

    /// Signing a message with the session key failed
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Waiting for a websocket response timed out
    #[error("Timed out after {duration_ms}ms waiting for {method}")]
    Timeout { method: String, duration_ms: u64 },

    /// Websocket closed before a response arrived
    #[error("WebSocket connection closed")]
    ConnectionClosed,
}

/// Coarse classification shared by every calling convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Unauthorized,
    NotFound,
    Transport,
    Api,
    Config,
}

impl DeriveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DeriveError::Validation { .. } => ErrorKind::Validation,
            DeriveError::Unauthorized { .. } => ErrorKind::Unauthorized,
            DeriveError::NotFound { .. } => ErrorKind::NotFound,
            DeriveError::Http(_)
            | DeriveError::WebSocket(_)
            | DeriveError::Timeout { .. }
            | DeriveError::ConnectionClosed => ErrorKind::Transport,
            DeriveError::Rpc { .. }
            | DeriveError::Status { .. }
            | DeriveError::Subscription { .. } => ErrorKind::Api,
            DeriveError::Signing(_) | DeriveError::Config(_) | DeriveError::UrlParse(_) => {
                ErrorKind::Config
            }
        }
    }

    /// Check if the error came from the network substrate
    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DeriveError::Validation {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        DeriveError::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        DeriveError::NotFound {
            message: message.into(),
        }
    }
}

/// Result type alias for Derive operations
pub type Result<T> = std::result::Result<T, DeriveError>;
