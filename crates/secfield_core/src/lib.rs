//! # secfield core
//!
//! Encrypted single-value database fields.
//!
//! A [`SecureField`] holds one typed value and a secret. Before the value is
//! stored it is encoded with [`secfield_codec`] and sealed with AES-GCM into
//! an envelope; after it is loaded the envelope is opened and decoded back
//! into the value.
//!
//! ## Envelope
//!
//! ```text
//! nonce (12 bytes) || ciphertext || tag (16 bytes)
//! ```
//!
//! The secret selects AES-128, AES-192 or AES-256 by its length (16, 24 or
//! 32 bytes). Any other length fails on first use and keeps failing with the
//! same error for the lifetime of the holder.
//!
//! ## Validity
//!
//! The holder remembers whether its value is trustworthy. A failed open
//! marks it invalid and leaves the old value in place; callers should read
//! through [`SecureField::get`], which returns `None` for invalid values.
//!
//! ## Example
//!
//! ```
//! use secfield_core::{DriverValue, Scan, SecureField, ToDriverValue};
//!
//! let secret = b"0123456789abcdef0123456789abcdef";
//!
//! let outgoing = SecureField::new(secret, "4111-1111-1111-1111".to_string());
//! let stored: DriverValue = outgoing.to_driver_value().unwrap();
//!
//! let mut incoming = SecureField::new(secret, String::new());
//! incoming.scan(stored).unwrap();
//! assert_eq!(incoming.get().map(String::as_str), Some("4111-1111-1111-1111"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
pub mod crypto;
mod driver;
mod error;
mod field;

pub use config::{Config, DEFAULT_MAX_ENVELOPE_LEN};
pub use crypto::{FieldCipher, KeySize};
pub use driver::{DriverValue, Scan, ToDriverValue};
pub use error::{CoreError, CoreResult};
pub use field::SecureField;

pub use secfield_codec::{CodecError, Decode, Encode, Structured};
