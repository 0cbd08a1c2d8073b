//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Failed to encode a value.
    #[error("encoding failed: {message}")]
    EncodingFailed {
        /// Description of the encoding error.
        message: String,
    },

    /// Failed to decode bytes into the target type.
    #[error("decoding failed: {message}")]
    DecodingFailed {
        /// Description of the decoding error.
        message: String,
    },

    /// A fixed-width type was decoded from a payload of the wrong length.
    #[error("width mismatch for {type_name}: expected {expected} bytes, got {actual}")]
    WidthMismatch {
        /// Name of the target type.
        type_name: &'static str,
        /// Encoded width of the target type.
        expected: usize,
        /// Length of the payload that was supplied.
        actual: usize,
    },
}

impl CodecError {
    /// Create an encoding failed error.
    pub fn encoding_failed(message: impl Into<String>) -> Self {
        Self::EncodingFailed {
            message: message.into(),
        }
    }

    /// Create a decoding failed error.
    pub fn decoding_failed(message: impl Into<String>) -> Self {
        Self::DecodingFailed {
            message: message.into(),
        }
    }

    /// Create a width mismatch error.
    pub fn width_mismatch(type_name: &'static str, expected: usize, actual: usize) -> Self {
        Self::WidthMismatch {
            type_name,
            expected,
            actual,
        }
    }
}
