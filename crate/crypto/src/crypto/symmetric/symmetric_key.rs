use std::fmt;

use openssl::{memcmp, rand::rand_bytes};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::AES_256_GCM_KEY_LENGTH;
use crate::{CryptoError, CryptoResult, CryptoResultHelper};

/// A single use AES-256-GCM data encryption key.
///
/// The bytes are wiped when the key is dropped and never show up in `Debug`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; AES_256_GCM_KEY_LENGTH]);

impl SymmetricKey {
    /// Draw a new key from the OpenSSL CSPRNG.
    pub fn generate() -> CryptoResult<Self> {
        let mut key = Self([0; AES_256_GCM_KEY_LENGTH]);
        rand_bytes(&mut key.0).context("symmetric key generation")?;
        Ok(key)
    }

    pub fn try_from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() != AES_256_GCM_KEY_LENGTH {
            return Err(CryptoError::InvalidKeyEncoding(format!(
                "a symmetric key must be {AES_256_GCM_KEY_LENGTH} bytes long, got {}",
                bytes.len()
            )));
        }
        let mut key = Self([0; AES_256_GCM_KEY_LENGTH]);
        key.0.copy_from_slice(bytes);
        Ok(key)
    }

    /// Parse the lowercase or uppercase hex form of a key
    pub fn from_hex(hex_key: &[u8]) -> CryptoResult<Self> {
        let mut key = Self([0; AES_256_GCM_KEY_LENGTH]);
        hex::decode_to_slice(hex_key, &mut key.0).map_err(|e| {
            CryptoError::InvalidKeyEncoding(format!("invalid hex symmetric key: {e}"))
        })?;
        Ok(key)
    }

    #[must_use]
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(&self.0))
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; AES_256_GCM_KEY_LENGTH] {
        &self.0
    }
}

impl PartialEq for SymmetricKey {
    fn eq(&self, other: &Self) -> bool {
        memcmp::eq(&self.0, &other.0)
    }
}

impl Eq for SymmetricKey {}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey([****])")
    }
}
