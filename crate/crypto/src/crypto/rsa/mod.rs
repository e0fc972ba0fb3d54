use std::{fmt, str::FromStr};

use openssl::md::{Md, MdRef};
use serde::{Deserialize, Serialize};

use crate::{CryptoError, CryptoResult};

pub mod ckm_rsa_pkcs_oaep;
mod wrapped_key;

pub use wrapped_key::{WrappedKey, WrappedKeyEncoding};

/// The hash function used by OAEP, both as the label hash and in MGF1.
///
/// SHA-1 is the default of most OAEP implementations (`RSA_PKCS1_OAEP_PADDING`),
/// so that envelopes produced by other tools can be opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsaOaepHash {
    #[default]
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl RsaOaepHash {
    #[must_use]
    pub fn to_md(self) -> &'static MdRef {
        match self {
            Self::Sha1 => Md::sha1(),
            Self::Sha256 => Md::sha256(),
            Self::Sha384 => Md::sha384(),
            Self::Sha512 => Md::sha512(),
        }
    }

    /// Output length of the hash function in bytes
    #[must_use]
    pub const fn output_size(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

impl fmt::Display for RsaOaepHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        })
    }
}

impl FromStr for RsaOaepHash {
    type Err = CryptoError;

    fn from_str(s: &str) -> CryptoResult<Self> {
        match s.to_lowercase().replace('-', "").as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            _ => Err(CryptoError::UnsupportedParameter(format!(
                "unsupported OAEP hash function: {s}, expected one of sha1, sha256, sha384, sha512"
            ))),
        }
    }
}
