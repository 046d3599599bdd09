//! Shared error type across sysfeed crates.

use thiserror::Error;

/// Stable error codes, used in logs and HTTP error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed config.
    BadRequest,
    /// Event name or payload violates SSE framing.
    InvalidEvent,
    /// Metrics query failed.
    Metrics,
    /// Capability not available on this platform.
    Unsupported,
    /// Writing to the client failed.
    Transport,
    /// Server is draining.
    ShuttingDown,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::InvalidEvent => "INVALID_EVENT",
            ClientCode::Metrics => "METRICS",
            ClientCode::Unsupported => "UNSUPPORTED",
            ClientCode::Transport => "TRANSPORT",
            ClientCode::ShuttingDown => "SHUTTING_DOWN",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, SysfeedError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum SysfeedError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("invalid event: {0}")]
    InvalidEvent(String),
    #[error("metrics unavailable: {0}")]
    Metrics(String),
    #[error("unsupported on this platform: {0}")]
    Unsupported(&'static str),
    #[error("transport: {0}")]
    Transport(String),
    #[error("server is shutting down")]
    ShuttingDown,
    #[error("internal: {0}")]
    Internal(String),
}

impl SysfeedError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            SysfeedError::BadRequest(_) => ClientCode::BadRequest,
            SysfeedError::InvalidEvent(_) => ClientCode::InvalidEvent,
            SysfeedError::Metrics(_) => ClientCode::Metrics,
            SysfeedError::Unsupported(_) => ClientCode::Unsupported,
            SysfeedError::Transport(_) => ClientCode::Transport,
            SysfeedError::ShuttingDown => ClientCode::ShuttingDown,
            SysfeedError::Internal(_) => ClientCode::Internal,
        }
    }
}
