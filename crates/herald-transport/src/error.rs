use thiserror::Error;

/// Errors that can occur within a transport implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The underlying connection could not be established.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A message could not be delivered to the remote endpoint.
    #[error("Send failed: {0}")]
    SendFailed(String),

    /// A send exceeded the configured time budget.
    #[error("Send timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// The transport-specific configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TransportError>;
