use std::{convert::Infallible, fmt, str::FromStr};

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::{
    CryptoError, CryptoResult,
    crypto::symmetric::{AES_256_GCM_KEY_LENGTH, SymmetricKey},
};

/// A symmetric key wrapped with RSA-OAEP, in standard padded base64
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedKey(String);

impl WrappedKey {
    #[must_use]
    pub fn encode(wrapped_bytes: &[u8]) -> Self {
        Self(STANDARD.encode(wrapped_bytes))
    }

    /// Decode the base64 text, which must hold exactly `expected_length` bytes.
    ///
    /// The length is checked on the text before decoding.
    pub fn decode(&self, expected_length: usize) -> CryptoResult<Vec<u8>> {
        let encoded = self.0.trim();
        let expected_encoded_length = expected_length.div_ceil(3) * 4;
        if encoded.len() != expected_encoded_length {
            return Err(CryptoError::UnwrapFailed(format!(
                "the wrapped key must be {expected_encoded_length} base64 characters long, got {}",
                encoded.len()
            )));
        }
        STANDARD
            .decode(encoded)
            .map_err(|e| CryptoError::UnwrapFailed(format!("the wrapped key is not valid base64: {e}")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WrappedKey {
    fn from(encoded: String) -> Self {
        Self(encoded)
    }
}

impl From<&str> for WrappedKey {
    fn from(encoded: &str) -> Self {
        Self(encoded.to_owned())
    }
}

impl FromStr for WrappedKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for WrappedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the symmetric key is serialized before being wrapped.
///
/// `Hex` wraps the 64 characters lowercase hex text of the key, which is what
/// legacy producers do. Both forms are always accepted when unwrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrappedKeyEncoding {
    #[default]
    Raw,
    Hex,
}

impl WrappedKeyEncoding {
    pub(crate) fn encode_payload(self, key: &SymmetricKey) -> Zeroizing<Vec<u8>> {
        match self {
            Self::Raw => Zeroizing::new(key.as_bytes().to_vec()),
            Self::Hex => Zeroizing::new(key.to_hex().as_bytes().to_vec()),
        }
    }

    /// Recover the symmetric key from an unwrapped payload, whatever its encoding
    pub(crate) fn decode_payload(payload: &[u8]) -> CryptoResult<SymmetricKey> {
        let key = match payload.len() {
            AES_256_GCM_KEY_LENGTH => SymmetricKey::try_from_bytes(payload),
            l if l == 2 * AES_256_GCM_KEY_LENGTH => SymmetricKey::from_hex(payload),
            l => {
                return Err(CryptoError::UnwrapFailed(format!(
                    "the unwrapped key has an unexpected length of {l} bytes"
                )));
            }
        };
        key.map_err(|e| CryptoError::UnwrapFailed(e.to_string()))
    }
}

impl fmt::Display for WrappedKeyEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Raw => "raw",
            Self::Hex => "hex",
        })
    }
}

impl FromStr for WrappedKeyEncoding {
    type Err = CryptoError;

    fn from_str(s: &str) -> CryptoResult<Self> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "hex" => Ok(Self::Hex),
            _ => Err(CryptoError::UnsupportedParameter(format!(
                "unsupported wrapped key encoding: {s}, expected raw or hex"
            ))),
        }
    }
}
