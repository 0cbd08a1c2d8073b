//! Property tests for sealing and opening.

use proptest::prelude::*;
use secfield_core::crypto::{envelope_len, FieldCipher, NONCE_SIZE};
use secfield_core::{CoreError, Decode, Encode, SecureField};

fn key_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![Just(16usize), Just(24usize), Just(32usize)]
        .prop_flat_map(|len| prop::collection::vec(any::<u8>(), len))
}

fn seal_open<T>(key: &[u8], value: T) -> T
where
    T: Encode + Decode + Clone,
{
    let envelope = SecureField::new(key, value.clone()).seal().unwrap();
    let mut loaded = SecureField::new(key, value);
    loaded.open(&envelope).unwrap();
    assert!(loaded.is_valid());
    loaded.into_inner().unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn cipher_roundtrip(key in key_strategy(), plaintext in prop::collection::vec(any::<u8>(), 0..512)) {
        let cipher = FieldCipher::new(&key).unwrap();
        let envelope = cipher.seal(&plaintext).unwrap();
        prop_assert_eq!(envelope.len(), envelope_len(plaintext.len()));
        let opened = cipher.open(&envelope).unwrap();
        prop_assert_eq!(opened.as_slice(), plaintext.as_slice());
    }

    #[test]
    fn i64_through_field(key in key_strategy(), v in any::<i64>()) {
        prop_assert_eq!(seal_open(&key, v), v);
    }

    #[test]
    fn u16_through_field(key in key_strategy(), v in any::<u16>()) {
        prop_assert_eq!(seal_open(&key, v), v);
    }

    #[test]
    fn f64_through_field(key in key_strategy(), v in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        prop_assert_eq!(seal_open(&key, v).to_bits(), v.to_bits());
    }

    #[test]
    fn usize_through_field(key in key_strategy(), v in any::<usize>()) {
        prop_assert_eq!(seal_open(&key, v), v);
    }

    #[test]
    fn string_through_field(key in key_strategy(), v in ".{0,64}") {
        prop_assert_eq!(seal_open(&key, v.clone()), v);
    }

    #[test]
    fn any_flipped_byte_is_detected(
        plaintext in prop::collection::vec(any::<u8>(), 0..64),
        position in any::<prop::sample::Index>(),
        mask in 1u8..=255,
    ) {
        let cipher = FieldCipher::new(&[9u8; 32]).unwrap();
        let mut envelope = cipher.seal(&plaintext).unwrap();
        // Only the ciphertext and tag region; the nonce is covered separately.
        let body = envelope.len() - NONCE_SIZE;
        let index = NONCE_SIZE + position.index(body);
        envelope[index] ^= mask;
        prop_assert_eq!(cipher.open(&envelope).unwrap_err(), CoreError::DecryptionFailed);
    }

    #[test]
    fn flipped_nonce_is_detected(position in 0usize..NONCE_SIZE, mask in 1u8..=255) {
        let cipher = FieldCipher::new(&[9u8; 16]).unwrap();
        let mut envelope = cipher.seal(b"payload").unwrap();
        envelope[position] ^= mask;
        prop_assert_eq!(cipher.open(&envelope).unwrap_err(), CoreError::DecryptionFailed);
    }

    #[test]
    fn invalid_key_lengths_rejected(len in 0usize..64) {
        prop_assume!(![16, 24, 32].contains(&len));
        let field = SecureField::new(vec![0u8; len], 1u8);
        prop_assert_eq!(field.seal().unwrap_err(), CoreError::key_length_invalid(len));
    }
}
