//! # secfield codec
//!
//! Type-directed canonical encoding for values stored in encrypted columns.
//!
//! The encoding of a value is chosen by its static type, never by looking at
//! the bytes:
//!
//! - `String` / `str` are raw UTF-8 bytes
//! - `Vec<u8>` is passed through unchanged
//! - fixed-width integers and floats are big-endian at their natural width
//! - `isize` / `usize` are widened to their 64-bit counterparts
//! - everything else goes through CBOR (see [`Structured`] and
//!   [`structured_codec!`])
//!
//! The same value always produces the same bytes, so the ciphertext length
//! of an encrypted column depends only on the value.
//!
//! ## Usage
//!
//! ```
//! use secfield_codec::{Decode, Encode};
//!
//! let bytes = 42i64.encode().unwrap();
//! assert_eq!(bytes, [0, 0, 0, 0, 0, 0, 0, 42]);
//!
//! let decoded = i64::decode(&bytes).unwrap();
//! assert_eq!(decoded, 42);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod fixed;
mod structured;

pub use error::{CodecError, CodecResult};
pub use fixed::FixedWidth;
pub use structured::{from_structured, to_structured, Structured};

/// Trait for types that can be encoded to canonical bytes.
pub trait Encode {
    /// Encode this value to canonical bytes.
    fn encode(&self) -> CodecResult<Vec<u8>>;
}

/// Trait for types that can be decoded from canonical bytes.
pub trait Decode: Sized {
    /// Decode a value of this type from canonical bytes.
    fn decode(bytes: &[u8]) -> CodecResult<Self>;
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self) -> CodecResult<Vec<u8>> {
        (**self).encode()
    }
}

impl Encode for str {
    fn encode(&self) -> CodecResult<Vec<u8>> {
        Ok(self.as_bytes().to_vec())
    }
}

impl Encode for String {
    fn encode(&self) -> CodecResult<Vec<u8>> {
        self.as_str().encode()
    }
}

impl Decode for String {
    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        // Copy, then validate. The plaintext buffer is owned by the caller.
        String::from_utf8(bytes.to_vec())
            .map_err(|e| CodecError::decoding_failed(format!("invalid UTF-8: {e}")))
    }
}

impl Encode for [u8] {
    fn encode(&self) -> CodecResult<Vec<u8>> {
        Ok(self.to_vec())
    }
}

impl Encode for Vec<u8> {
    fn encode(&self) -> CodecResult<Vec<u8>> {
        Ok(self.clone())
    }
}

impl Decode for Vec<u8> {
    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        Ok(bytes.to_vec())
    }
}
