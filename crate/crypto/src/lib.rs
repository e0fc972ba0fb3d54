//! Hybrid envelope encryption.
//!
//! A payload is encrypted with a fresh AES-256-GCM key, and that key is
//! wrapped with RSA-OAEP under the public half of a long lived key pair.
//! See [`crypto::envelope::EnvelopeCipher`].

pub use error::{
    CryptoError,
    result::{CryptoResult, CryptoResultHelper},
};

pub mod crypto;
mod error;

#[cfg(test)]
mod proptests;

#[cfg(test)]
pub(crate) mod test_utils;
