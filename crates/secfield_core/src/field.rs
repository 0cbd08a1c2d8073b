//! The secure field holder.
//!
//! A [`SecureField`] owns one plaintext value together with the secret used
//! to seal it. Writing goes `encode -> seal`, reading goes `open -> decode`.
//! The holder tracks whether its value can be trusted:
//!
//! | State | Trigger | Next state |
//! |---|---|---|
//! | valid | seal succeeds | valid, value unchanged |
//! | any | open succeeds | valid, value replaced |
//! | any | open fails to decrypt or decode | invalid, value unchanged |
//! | any | cipher setup fails | invalid for good, same error on every call |
//!
//! The cipher is built on first use, which includes asking whether the
//! holder is valid. A bad secret is reported on that call and replayed on
//! every call after it, so a holder with a bad secret is never valid.

use crate::config::Config;
use crate::crypto::{FieldCipher, KeySize};
use crate::error::{CoreError, CoreResult};
use secfield_codec::{Decode, Encode};
use std::sync::OnceLock;
use zeroize::Zeroizing;

/// A value that is encrypted before it is stored and decrypted after it is
/// loaded.
///
/// # Example
///
/// ```
/// use secfield_core::SecureField;
///
/// let secret = [7u8; 32];
/// let field = SecureField::new(&secret, 42i64);
/// let envelope = field.seal().unwrap();
/// assert_eq!(envelope.len(), 12 + 8 + 16);
///
/// let mut loaded = SecureField::new(&secret, 0i64);
/// loaded.open(&envelope).unwrap();
/// assert_eq!(loaded.get(), Some(&42));
/// ```
pub struct SecureField<T> {
    value: T,
    valid: bool,
    secret: Zeroizing<Vec<u8>>,
    cipher: OnceLock<CoreResult<FieldCipher>>,
    config: Config,
}

impl<T> SecureField<T> {
    /// Creates a holder with default configuration.
    ///
    /// The secret is copied in and wiped when the holder is dropped. Its
    /// length is checked on first use, not here.
    pub fn new(secret: impl AsRef<[u8]>, value: T) -> Self {
        Self::with_config(secret, value, Config::default())
    }

    /// Creates a holder with the given configuration.
    pub fn with_config(secret: impl AsRef<[u8]>, value: T, config: Config) -> Self {
        Self {
            value,
            valid: true,
            secret: Zeroizing::new(secret.as_ref().to_vec()),
            cipher: OnceLock::new(),
            config,
        }
    }

    /// Returns the held value, whether or not it is valid.
    ///
    /// Check [`is_valid`](Self::is_valid) before trusting it, or use
    /// [`get`](Self::get).
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the held value only if it is valid.
    pub fn get(&self) -> Option<&T> {
        self.is_valid().then_some(&self.value)
    }

    /// Consumes the holder and returns the value if it is valid.
    pub fn into_inner(self) -> Option<T> {
        if self.is_valid() {
            Some(self.value)
        } else {
            None
        }
    }

    /// Returns true if the held value can be trusted.
    ///
    /// This is false after a failed open, and permanently false if the
    /// secret cannot build a cipher. Runs the cipher setup if nothing has yet.
    pub fn is_valid(&self) -> bool {
        self.valid && self.cipher().is_ok()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Key size selected by the secret, if the secret is usable.
    pub fn key_size(&self) -> CoreResult<KeySize> {
        self.cipher().map(FieldCipher::key_size)
    }

    /// Forces cipher setup and returns its outcome.
    ///
    /// The outcome is computed once. Every later call, and every seal or open,
    /// sees the same result.
    pub fn check(&self) -> CoreResult<()> {
        self.cipher().map(|_| ())
    }

    fn cipher(&self) -> CoreResult<&FieldCipher> {
        self.cipher
            .get_or_init(|| {
                let result = FieldCipher::new(&self.secret);
                match &result {
                    Ok(cipher) => tracing::debug!(
                        key_bits = cipher.key_size().bits(),
                        "secure field cipher initialized"
                    ),
                    Err(e) => tracing::warn!(error = %e, "secure field cipher setup failed"),
                }
                result
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    fn open_plaintext(&self, envelope: &[u8], aad: &[u8]) -> CoreResult<Zeroizing<Vec<u8>>> {
        let cipher = self.cipher()?;
        if envelope.len() > self.config.max_envelope_len {
            return Err(CoreError::envelope_too_large(
                envelope.len(),
                self.config.max_envelope_len,
            ));
        }
        cipher.open_with_aad(envelope, aad)
    }
}

impl<T: Encode> SecureField<T> {
    /// Encodes and encrypts the held value.
    ///
    /// Returns the envelope `nonce || ciphertext || tag`. The holder is not
    /// modified.
    ///
    /// # Errors
    ///
    /// - the cached cipher setup error, if the secret is unusable
    /// - [`CoreError::InvalidHolderState`] if the value is not valid
    /// - [`CoreError::Encode`] if the value cannot be encoded
    /// - [`CoreError::EntropyUnavailable`] if no nonce could be drawn
    pub fn seal(&self) -> CoreResult<Vec<u8>> {
        self.seal_with_aad(&[])
    }

    /// Like [`seal`](Self::seal), additionally authenticating `aad`.
    ///
    /// Use this to bind the envelope to where it is stored, for example a
    /// table, column and row key.
    pub fn seal_with_aad(&self, aad: &[u8]) -> CoreResult<Vec<u8>> {
        let cipher = self.cipher()?;
        if !self.valid {
            return Err(CoreError::InvalidHolderState);
        }
        let plaintext = Zeroizing::new(self.value.encode().map_err(CoreError::Encode)?);
        cipher.seal_with_aad(&plaintext, aad)
    }
}

impl<T: Decode> SecureField<T> {
    /// Decrypts and decodes an envelope into the held value.
    ///
    /// On success the value is replaced and the holder becomes valid. If the
    /// envelope cannot be decrypted or decoded the holder becomes invalid and
    /// keeps its previous value; no partial plaintext is kept.
    ///
    /// # Errors
    ///
    /// - the cached cipher setup error, if the secret is unusable
    /// - [`CoreError::EnvelopeTooLarge`] above the configured limit
    /// - [`CoreError::EnvelopeTooShort`] if there is no room for a nonce
    /// - [`CoreError::DecryptionFailed`] if authentication fails
    /// - [`CoreError::Decode`] if the plaintext does not decode into `T`
    pub fn open(&mut self, envelope: &[u8]) -> CoreResult<()> {
        self.open_with_aad(envelope, &[])
    }

    /// Like [`open`](Self::open), verifying the `aad` given to
    /// [`seal_with_aad`](Self::seal_with_aad).
    pub fn open_with_aad(&mut self, envelope: &[u8], aad: &[u8]) -> CoreResult<()> {
        let decoded = self
            .open_plaintext(envelope, aad)
            .and_then(|plaintext| T::decode(&plaintext).map_err(CoreError::Decode));

        match decoded {
            Ok(value) => {
                self.value = value;
                self.valid = true;
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, envelope_len = envelope.len(), "secure field open failed");
                self.valid = false;
                Err(e)
            }
        }
    }
}

impl<T> std::fmt::Debug for SecureField<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureField")
            .field("value", &"[REDACTED]")
            .field("valid", &self.is_valid())
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
