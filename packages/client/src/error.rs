//! Error types for the notification client.

use thiserror::Error;

/// Realtime channel errors
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The WebSocket handshake failed
    #[error("Connection error: {0}")]
    Connect(String),
}

/// Persisted session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to access session file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed session file: {0}")]
    Format(#[from] serde_json::Error),
}
