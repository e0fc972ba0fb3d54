//! Property-based tests of the envelope format.
//!
//! - Sealing then opening returns the payload, whatever its content
//! - Altering any byte of the payload is detected
//! - The textual form of a payload always parses back

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use crate::{
    CryptoError,
    crypto::symmetric::{EnvelopeCiphertext, SymmetricKey, decrypt, encrypt},
    test_utils::test_cipher,
};

// ==================== Symmetric Property Tests ====================

proptest! {
    /// Any UTF-8 payload survives an AES-256-GCM round trip.
    #[test]
    fn symmetric_round_trip(plaintext in ".{0,2000}") {
        let key = SymmetricKey::generate().unwrap();
        let envelope = encrypt(&key, plaintext.as_bytes()).unwrap();
        prop_assert_eq!(envelope.ciphertext().len(), plaintext.len());

        let parsed: EnvelopeCiphertext = envelope.to_string().parse().unwrap();
        prop_assert_eq!(&parsed, &envelope);
        let decrypted = decrypt(&key, &parsed).unwrap();
        prop_assert_eq!(decrypted.as_slice(), plaintext.as_bytes());
    }

    /// Flipping any bit of the ciphertext or of the tag fails authentication.
    #[test]
    fn any_altered_bit_is_detected(
        plaintext in ".{1,200}",
        position in any::<prop::sample::Index>(),
        bit in 0_u8..8,
    ) {
        let key = SymmetricKey::generate().unwrap();
        let envelope = encrypt(&key, plaintext.as_bytes()).unwrap();

        let mut bytes = envelope.tag().to_vec();
        bytes.extend_from_slice(envelope.ciphertext());
        let index = position.index(bytes.len());
        bytes[index] ^= 1 << bit;
        let (tag, ciphertext) = bytes.split_at(16);
        let tampered = EnvelopeCiphertext::new(
            *envelope.nonce(),
            tag.try_into().unwrap(),
            ciphertext.to_vec(),
        );

        prop_assert!(matches!(decrypt(&key, &tampered), Err(CryptoError::AuthenticationFailed)));
    }
}

// ==================== Envelope Property Tests ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Sealing then opening returns the payload.
    #[test]
    fn envelope_round_trip(plaintext in ".{0,2000}") {
        let cipher = test_cipher();
        let sealed = cipher.seal(&plaintext).unwrap();
        let opened = cipher
            .open_encoded(sealed.wrapped_key.as_str(), &sealed.payload.to_string())
            .unwrap();
        prop_assert_eq!(opened, plaintext);
    }
}
