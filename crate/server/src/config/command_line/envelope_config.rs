use clap::Args;
use cosmian_envelope_crypto::crypto::{EnvelopeOptions, RsaOaepHash, WrappedKeyEncoding};
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_MAX_PAYLOAD_LENGTH: usize = 2000;

#[derive(Debug, Args, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// The hash function of the RSA OAEP padding: sha1, sha256, sha384 or sha512
    #[clap(long, env = "ENVELOPE_OAEP_HASH", default_value = "sha1")]
    pub oaep_hash: RsaOaepHash,

    /// How the AES key is serialized before being wrapped: raw, or hex for legacy clients.
    /// Both forms are always accepted on decryption.
    #[clap(
        long,
        env = "ENVELOPE_WRAPPED_KEY_ENCODING",
        default_value = "raw",
        verbatim_doc_comment
    )]
    pub wrapped_key_encoding: WrappedKeyEncoding,

    /// The maximum number of characters of a payload to encrypt
    #[clap(long, env = "ENVELOPE_MAX_PAYLOAD_LENGTH", default_value = "2000")]
    pub max_payload_length: usize,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            oaep_hash: RsaOaepHash::default(),
            wrapped_key_encoding: WrappedKeyEncoding::default(),
            max_payload_length: DEFAULT_MAX_PAYLOAD_LENGTH,
        }
    }
}

impl EnvelopeConfig {
    #[must_use]
    pub const fn envelope_options(&self) -> EnvelopeOptions {
        EnvelopeOptions {
            oaep_hash: self.oaep_hash,
            wrapped_key_encoding: self.wrapped_key_encoding,
        }
    }
}
