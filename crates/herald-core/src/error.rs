use thiserror::Error;

/// Process-level error taxonomy.
///
/// Every fatal failure in the run sequence maps onto one of these variants;
/// the binary inspects [`HeraldError::exit_code`] to decide how the process
/// terminates. Per-recipient send failures never reach this type — they are
/// logged and absorbed by the dispatcher.
#[derive(Debug, Error)]
pub enum HeraldError {
    /// A required input file does not exist on disk.
    #[error("Required input file not found: {path}")]
    ConfigMissing { path: String },

    /// The configuration or an input file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A record or job declaration failed validation. The whole run aborts —
    /// partial directories or job lists are never scheduled.
    #[error("Validation failed [{code}]: {reason}")]
    Validation { code: &'static str, reason: String },

    /// The messaging transport could not be connected.
    #[error("Transport connection failed: {0}")]
    TransportConnect(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for anything escaping the taxonomy above.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HeraldError {
    /// Short error code string included in the fatal log line.
    pub fn code(&self) -> &'static str {
        match self {
            HeraldError::ConfigMissing { .. } => "CONFIG_MISSING",
            HeraldError::Config(_) => "CONFIG_ERROR",
            HeraldError::Validation { code, .. } => code,
            HeraldError::TransportConnect(_) => "TRANSPORT_CONNECT",
            HeraldError::Io(_) => "IO_ERROR",
            HeraldError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Process exit code for this failure.
    ///
    /// 1 = validation/config/connection failure, 3 = unhandled internal error.
    pub fn exit_code(&self) -> i32 {
        match self {
            HeraldError::Internal(_) => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, HeraldError>;
