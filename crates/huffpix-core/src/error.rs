//! Error types for entropy coding operations.

use thiserror::Error;

/// Result type alias for entropy coding operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Entropy coding error types.
#[derive(Debug, Error)]
pub enum Error {
    /// Memory allocation failed while growing a queue or output buffer.
    #[error("allocation failed: could not allocate {requested_bytes} bytes")]
    AllocationFailed { requested_bytes: usize },

    /// Encoded input ran out before the requested symbol count was decoded.
    #[error("decode underrun: decoded {decoded} of {expected} symbols after {bytes_read} bytes")]
    DecodeUnderrun {
        decoded: usize,
        expected: usize,
        bytes_read: usize,
    },

    /// Symbol has no code in the active code table.
    #[error("no code for symbol {symbol}")]
    MissingCode { symbol: u8 },

    /// Configuration rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Worker pool for batch coding could not be set up.
    #[error("parallel runtime error: {0}")]
    Parallel(String),
}

impl Error {
    /// Create an allocation failure error.
    pub fn allocation_failed(requested_bytes: usize) -> Self {
        Error::AllocationFailed { requested_bytes }
    }

    /// Create a decoder underrun error.
    pub fn decode_underrun(decoded: usize, expected: usize, bytes_read: usize) -> Self {
        Error::DecodeUnderrun {
            decoded,
            expected,
            bytes_read,
        }
    }

    /// Create a missing code error.
    pub fn missing_code(symbol: u8) -> Self {
        Error::MissingCode { symbol }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfig(message.into())
    }

    /// Check if error is recoverable (can retry with different parameters).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::AllocationFailed { .. } | Error::DecodeUnderrun { .. }
        )
    }

    /// Get error category for metrics.
    pub fn category(&self) -> &'static str {
        match self {
            Error::AllocationFailed { .. } => "allocation_failed",
            Error::DecodeUnderrun { .. } => "decode_underrun",
            Error::MissingCode { .. } => "missing_code",
            Error::InvalidConfig(_) => "invalid_config",
            Error::Parallel(_) => "parallel",
        }
    }
}
