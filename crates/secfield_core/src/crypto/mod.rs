//! Authenticated encryption for single field values.
//!
//! ## Security Model
//!
//! - AES-GCM with a 128, 192 or 256-bit key, chosen by the secret length
//! - A fresh random 96-bit nonce per seal, drawn from the OS CSPRNG
//! - Decrypted plaintext is held in zeroizing buffers
//!
//! ## Envelope format
//!
//! ```text
//! nonce (12 bytes) || ciphertext || tag (16 bytes)
//! ```
//!
//! The nonce is stored in the clear; it only has to be unique per message.
//!
//! ## Usage
//!
//! ```
//! use secfield_core::crypto::FieldCipher;
//!
//! let cipher = FieldCipher::new(&[7u8; 32]).unwrap();
//! let envelope = cipher.seal(b"secret data").unwrap();
//! let plaintext = cipher.open(&envelope).unwrap();
//! assert_eq!(plaintext.as_slice(), b"secret data");
//! ```

mod cipher;

pub use cipher::{
    envelope_len, Aes192Gcm, FieldCipher, KeySize, ENVELOPE_OVERHEAD, NONCE_SIZE, TAG_SIZE,
};
