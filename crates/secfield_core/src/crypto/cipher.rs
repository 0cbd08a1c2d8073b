//! AES-GCM sealing and opening of envelopes.

use crate::error::{CoreError, CoreResult};
use aes::Aes192;
use aes_gcm::{
    aead::{consts::U12, Aead, KeyInit, Payload},
    Aes128Gcm, Aes256Gcm, AesGcm, Nonce,
};
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

/// Size of the GCM nonce in bytes.
pub const NONCE_SIZE: usize = 12;
/// Size of the GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;
/// Bytes an envelope adds on top of the plaintext.
pub const ENVELOPE_OVERHEAD: usize = NONCE_SIZE + TAG_SIZE;

/// AES-192 in GCM mode with a 96-bit nonce.
pub type Aes192Gcm = AesGcm<Aes192, U12>;

/// Length of the envelope produced for a plaintext of `plaintext_len` bytes.
#[must_use]
pub const fn envelope_len(plaintext_len: usize) -> usize {
    plaintext_len + ENVELOPE_OVERHEAD
}

/// AES key size, selected by the length of the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySize {
    /// 16-byte key.
    Aes128,
    /// 24-byte key.
    Aes192,
    /// 32-byte key.
    Aes256,
}

impl KeySize {
    /// Maps a secret length to a key size.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::KeyLengthInvalid`] unless `len` is 16, 24 or 32.
    pub fn from_len(len: usize) -> CoreResult<Self> {
        match len {
            16 => Ok(Self::Aes128),
            24 => Ok(Self::Aes192),
            32 => Ok(Self::Aes256),
            other => Err(CoreError::key_length_invalid(other)),
        }
    }

    /// Key length in bytes.
    #[must_use]
    pub const fn byte_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }

    /// Key length in bits.
    #[must_use]
    pub const fn bits(self) -> usize {
        self.byte_len() * 8
    }
}

/// An initialized AES-GCM cipher for one secret.
///
/// Construction validates the secret; sealing and opening never fail because
/// of the key afterwards. The expanded key schedule is wiped on drop.
pub enum FieldCipher {
    /// AES-128-GCM.
    Aes128(Aes128Gcm),
    /// AES-192-GCM.
    Aes192(Aes192Gcm),
    /// AES-256-GCM.
    Aes256(Aes256Gcm),
}

impl FieldCipher {
    /// Builds a cipher from a 16, 24 or 32-byte secret.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::KeyLengthInvalid`] for any other length.
    pub fn new(secret: &[u8]) -> CoreResult<Self> {
        let invalid = |_| CoreError::key_length_invalid(secret.len());
        let cipher = match KeySize::from_len(secret.len())? {
            KeySize::Aes128 => Self::Aes128(Aes128Gcm::new_from_slice(secret).map_err(invalid)?),
            KeySize::Aes192 => Self::Aes192(Aes192Gcm::new_from_slice(secret).map_err(invalid)?),
            KeySize::Aes256 => Self::Aes256(Aes256Gcm::new_from_slice(secret).map_err(invalid)?),
        };
        Ok(cipher)
    }

    /// Returns the key size this cipher was built with.
    #[must_use]
    pub fn key_size(&self) -> KeySize {
        match self {
            Self::Aes128(_) => KeySize::Aes128,
            Self::Aes192(_) => KeySize::Aes192,
            Self::Aes256(_) => KeySize::Aes256,
        }
    }

    /// Encrypts `plaintext` into `nonce || ciphertext || tag`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EntropyUnavailable`] if no nonce could be drawn.
    pub fn seal(&self, plaintext: &[u8]) -> CoreResult<Vec<u8>> {
        self.seal_with_aad(plaintext, &[])
    }

    /// Encrypts `plaintext` and authenticates `aad` alongside it.
    ///
    /// The associated data is not stored in the envelope; the same bytes
    /// must be passed to [`open_with_aad`](Self::open_with_aad).
    pub fn seal_with_aad(&self, plaintext: &[u8], aad: &[u8]) -> CoreResult<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng
            .try_fill_bytes(&mut nonce_bytes)
            .map_err(|e| CoreError::entropy_unavailable(e.to_string()))?;
        let nonce = Nonce::<U12>::from_slice(&nonce_bytes);

        let payload = Payload {
            msg: plaintext,
            aad,
        };
        let ciphertext = match self {
            Self::Aes128(c) => c.encrypt(nonce, payload),
            Self::Aes192(c) => c.encrypt(nonce, payload),
            Self::Aes256(c) => c.encrypt(nonce, payload),
        }
        .map_err(|_| CoreError::EncryptionFailed)?;

        let mut envelope = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        envelope.extend_from_slice(&nonce_bytes);
        envelope.extend(ciphertext);

        tracing::trace!(
            plaintext_len = plaintext.len(),
            envelope_len = envelope.len(),
            "sealed envelope"
        );
        Ok(envelope)
    }

    /// Decrypts an envelope produced by [`seal`](Self::seal).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EnvelopeTooShort`] if the envelope cannot hold a
    /// nonce, and [`CoreError::DecryptionFailed`] if authentication fails.
    pub fn open(&self, envelope: &[u8]) -> CoreResult<Zeroizing<Vec<u8>>> {
        self.open_with_aad(envelope, &[])
    }

    /// Decrypts an envelope produced by [`seal_with_aad`](Self::seal_with_aad).
    pub fn open_with_aad(&self, envelope: &[u8], aad: &[u8]) -> CoreResult<Zeroizing<Vec<u8>>> {
        if envelope.len() < NONCE_SIZE {
            return Err(CoreError::envelope_too_short(envelope.len(), NONCE_SIZE));
        }

        let (nonce_bytes, ciphertext) = envelope.split_at(NONCE_SIZE);
        let nonce = Nonce::<U12>::from_slice(nonce_bytes);

        let payload = Payload {
            msg: ciphertext,
            aad,
        };
        match self {
            Self::Aes128(c) => c.decrypt(nonce, payload),
            Self::Aes192(c) => c.decrypt(nonce, payload),
            Self::Aes256(c) => c.decrypt(nonce, payload),
        }
        .map(Zeroizing::new)
        .map_err(|_| CoreError::DecryptionFailed)
    }
}

impl std::fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldCipher")
            .field("key_size", &self.key_size())
            .finish_non_exhaustive()
    }
}
