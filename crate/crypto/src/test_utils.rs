#![allow(clippy::unwrap_used)]

use std::sync::LazyLock;

use openssl::{pkey::PKey, rsa::Rsa};

use crate::crypto::{envelope::EnvelopeCipher, key_material::KeyMaterial};

pub(crate) struct TestKeyPair {
    pub(crate) public_pem: String,
    pub(crate) private_pem: String,
}

fn generate_key_pair(bits: u32) -> TestKeyPair {
    let private_key = PKey::from_rsa(Rsa::generate(bits).unwrap()).unwrap();
    TestKeyPair {
        public_pem: String::from_utf8(private_key.public_key_to_pem().unwrap()).unwrap(),
        private_pem: String::from_utf8(private_key.private_key_to_pem_pkcs8().unwrap()).unwrap(),
    }
}

/// Generating RSA keys is slow: the test pairs are shared by all tests
pub(crate) static KEY_PAIR: LazyLock<TestKeyPair> = LazyLock::new(|| generate_key_pair(2048));
pub(crate) static OTHER_KEY_PAIR: LazyLock<TestKeyPair> =
    LazyLock::new(|| generate_key_pair(2048));

pub(crate) fn test_key_material() -> KeyMaterial {
    KeyMaterial::load(&KEY_PAIR.public_pem, &KEY_PAIR.private_pem).unwrap()
}

pub(crate) fn test_cipher() -> EnvelopeCipher {
    EnvelopeCipher::new(test_key_material())
}
