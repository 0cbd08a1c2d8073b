//! Error types for secfield core.

use secfield_codec::CodecError;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while sealing or opening a secure field.
///
/// The type is `Clone` because a failed cipher setup is cached and handed
/// back, unchanged, on every later call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The held value is not trustworthy and cannot be sealed.
    #[error("secure field holds an invalid value")]
    InvalidHolderState,

    /// The secret is not a valid AES key length.
    #[error("invalid key length: expected 16, 24 or 32 bytes, got {actual}")]
    KeyLengthInvalid {
        /// Length of the supplied secret.
        actual: usize,
    },

    /// The value could not be encoded before sealing.
    #[error("encode failed: {0}")]
    Encode(CodecError),

    /// The decrypted bytes could not be decoded into the target type.
    #[error("decode failed: {0}")]
    Decode(CodecError),

    /// The envelope is shorter than a nonce.
    #[error("envelope too short: {len} bytes, need at least {min}")]
    EnvelopeTooShort {
        /// Length of the supplied envelope.
        len: usize,
        /// Minimum acceptable length.
        min: usize,
    },

    /// The envelope exceeds the configured size limit.
    #[error("envelope too large: {len} bytes, limit is {max}")]
    EnvelopeTooLarge {
        /// Length of the supplied envelope.
        len: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Authentication failed: wrong key, tampered or truncated data.
    #[error("decryption failed")]
    DecryptionFailed,

    /// The AEAD primitive refused to encrypt.
    #[error("encryption failed")]
    EncryptionFailed,

    /// The OS random source could not produce a nonce.
    #[error("entropy source unavailable: {message}")]
    EntropyUnavailable {
        /// Description reported by the random source.
        message: String,
    },

    /// The storage driver supplied a value that is neither bytes nor text.
    #[error("unsupported source type: {type_name}")]
    UnsupportedSourceType {
        /// Name of the supplied driver type.
        type_name: &'static str,
    },
}

impl CoreError {
    /// Creates an invalid key length error.
    pub fn key_length_invalid(actual: usize) -> Self {
        Self::KeyLengthInvalid { actual }
    }

    /// Creates an envelope too short error.
    pub fn envelope_too_short(len: usize, min: usize) -> Self {
        Self::EnvelopeTooShort { len, min }
    }

    /// Creates an envelope too large error.
    pub fn envelope_too_large(len: usize, max: usize) -> Self {
        Self::EnvelopeTooLarge { len, max }
    }

    /// Creates an entropy unavailable error.
    pub fn entropy_unavailable(message: impl Into<String>) -> Self {
        Self::EntropyUnavailable {
            message: message.into(),
        }
    }

    /// Creates an unsupported source type error.
    pub fn unsupported_source_type(type_name: &'static str) -> Self {
        Self::UnsupportedSourceType { type_name }
    }
}
