use std::{fmt, str::FromStr};

use super::{AES_256_GCM_IV_LENGTH, AES_256_GCM_MAC_LENGTH};
use crate::{CryptoError, CryptoResult};

const SEPARATOR: char = ':';

/// An AES-256-GCM ciphertext with its nonce and authentication tag.
///
/// The textual form is `hex(nonce):hex(tag):hex(ciphertext)`.
/// The ciphertext component is empty when the plaintext is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeCiphertext {
    nonce: [u8; AES_256_GCM_IV_LENGTH],
    tag: [u8; AES_256_GCM_MAC_LENGTH],
    ciphertext: Vec<u8>,
}

impl EnvelopeCiphertext {
    #[must_use]
    pub const fn new(
        nonce: [u8; AES_256_GCM_IV_LENGTH],
        tag: [u8; AES_256_GCM_MAC_LENGTH],
        ciphertext: Vec<u8>,
    ) -> Self {
        Self {
            nonce,
            tag,
            ciphertext,
        }
    }

    #[must_use]
    pub const fn nonce(&self) -> &[u8; AES_256_GCM_IV_LENGTH] {
        &self.nonce
    }

    #[must_use]
    pub const fn tag(&self) -> &[u8; AES_256_GCM_MAC_LENGTH] {
        &self.tag
    }

    #[must_use]
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }
}

impl fmt::Display for EnvelopeCiphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            hex::encode(self.nonce),
            hex::encode(self.tag),
            hex::encode(&self.ciphertext)
        )
    }
}

impl FromStr for EnvelopeCiphertext {
    type Err = CryptoError;

    fn from_str(s: &str) -> CryptoResult<Self> {
        let components: Vec<&str> = s.trim().split(SEPARATOR).collect();
        let [nonce, tag, ciphertext] = components.as_slice() else {
            return Err(CryptoError::MalformedCiphertext(format!(
                "expected 3 components separated by '{SEPARATOR}', found {}",
                components.len()
            )));
        };
        Ok(Self {
            nonce: decode_fixed(nonce, "nonce")?,
            tag: decode_fixed(tag, "authentication tag")?,
            ciphertext: decode(ciphertext, "ciphertext")?,
        })
    }
}

fn decode(component: &str, name: &str) -> CryptoResult<Vec<u8>> {
    hex::decode(component)
        .map_err(|e| CryptoError::MalformedCiphertext(format!("the {name} is not valid hex: {e}")))
}

fn decode_fixed<const LENGTH: usize>(component: &str, name: &str) -> CryptoResult<[u8; LENGTH]> {
    let bytes = decode(component, name)?;
    bytes.as_slice().try_into().map_err(|_e| {
        CryptoError::MalformedCiphertext(format!(
            "the {name} must be {LENGTH} bytes long, found {}",
            bytes.len()
        ))
    })
}
