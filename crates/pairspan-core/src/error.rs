//! Error types module
//!
//! Two failure families exist in the upload pipeline:
//!
//! - [`TransferError`]: the file transfer to the processing service failed. Every variant
//!   is shown to the user as the same [`GENERIC_TRANSFER_ERROR`] string, but the variant is
//!   kept so callers can log and branch on the actual cause.
//! - [`FetchError`]: retrieving computed results failed. Cancellation is expected and
//!   silent; anything else is logged and never shown to the user.

/// The single message shown for any failed transfer.
pub const GENERIC_TRANSFER_ERROR: &str =
    "An error occurred in the attachment upload. Please check the date formatter and try again.";

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Warning level - for rejections caused by the user's input
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    /// The service could not be reached (connect failure, timeout, broken connection).
    #[error("Network failure: {0}")]
    Network(String),

    /// The service or the client rejected the file: bad date format, unsupported type,
    /// payload too large, unreadable local file.
    #[error("Validation failure: {0}")]
    Validation(String),

    #[error("Server failure ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Unknown transfer failure: {0}")]
    Unknown(String),
}

impl TransferError {
    /// Machine-readable error code (e.g., "NETWORK_FAILURE")
    pub fn error_code(&self) -> &'static str {
        match self {
            TransferError::Network(_) => "NETWORK_FAILURE",
            TransferError::Validation(_) => "VALIDATION_FAILURE",
            TransferError::Server { .. } => "SERVER_FAILURE",
            TransferError::Unknown(_) => "UNKNOWN_FAILURE",
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            TransferError::Validation(_) => LogLevel::Warn,
            TransferError::Network(_) | TransferError::Server { .. } | TransferError::Unknown(_) => {
                LogLevel::Error
            }
        }
    }

    /// User-facing message, identical for every variant.
    pub fn client_message(&self) -> &'static str {
        GENERIC_TRANSFER_ERROR
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The fetch was abandoned because the user removed the file or started another transfer.
    #[error("Fetch cancelled")]
    Cancelled,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}
