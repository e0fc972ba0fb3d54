use cosmian_logger::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::{
    CryptoError, CryptoResult,
    crypto::{
        key_material::KeyMaterial,
        rsa::{
            RsaOaepHash, WrappedKey, WrappedKeyEncoding,
            ckm_rsa_pkcs_oaep::{
                ckm_rsa_pkcs_oaep_key_unwrap, ckm_rsa_pkcs_oaep_key_wrap, max_wrappable_length,
            },
        },
        symmetric::{self, AES_256_GCM_KEY_LENGTH, EnvelopeCiphertext, SymmetricKey},
    },
};


/// Tunable parameters of the envelope format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeOptions {
    /// Hash function of the OAEP padding
    #[serde(default)]
    pub oaep_hash: RsaOaepHash,
    /// How the symmetric key is serialized before wrapping
    #[serde(default)]
    pub wrapped_key_encoding: WrappedKeyEncoding,
}

/// The two parts of a sealed payload. Both are required to open it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedEnvelope {
    pub wrapped_key: WrappedKey,
    pub payload: EnvelopeCiphertext,
}

/// Seals and opens payloads under a long lived RSA key pair.
///
/// Every seal draws a fresh AES-256-GCM key, encrypts the payload with it,
/// then wraps the key with RSA-OAEP. The cipher holds no mutable state and can be
/// shared between threads.
#[derive(Debug)]
pub struct EnvelopeCipher {
    key_material: KeyMaterial,
    options: EnvelopeOptions,
}

impl EnvelopeCipher {
    #[must_use]
    pub fn new(key_material: KeyMaterial) -> Self {
        Self::with_options(key_material, EnvelopeOptions::default())
    }

    #[must_use]
    pub fn with_options(key_material: KeyMaterial, options: EnvelopeOptions) -> Self {
        let wrapped_payload_length = match options.wrapped_key_encoding {
            WrappedKeyEncoding::Raw => AES_256_GCM_KEY_LENGTH,
            WrappedKeyEncoding::Hex => 2 * AES_256_GCM_KEY_LENGTH,
        };
        if max_wrappable_length(key_material.modulus_size(), options.oaep_hash)
            < wrapped_payload_length
        {
            warn!(
                "a {} bytes RSA modulus with OAEP {} cannot wrap {} encoded keys: sealing will fail",
                key_material.modulus_size(),
                options.oaep_hash,
                options.wrapped_key_encoding
            );
        }
        Self {
            key_material,
            options,
        }
    }

    #[must_use]
    pub const fn key_material(&self) -> &KeyMaterial {
        &self.key_material
    }

    #[must_use]
    pub const fn options(&self) -> &EnvelopeOptions {
        &self.options
    }

    /// Generate a fresh single use data encryption key.
    pub fn generate_symmetric_key(&self) -> CryptoResult<SymmetricKey> {
        SymmetricKey::generate()
    }

    /// Encrypt a UTF-8 payload under `key` with a fresh random nonce.
    pub fn symmetric_encrypt(
        &self,
        plaintext: &str,
        key: &SymmetricKey,
    ) -> CryptoResult<EnvelopeCiphertext> {
        symmetric::encrypt(key, plaintext.as_bytes())
    }

    /// Verify and decrypt a payload encrypted by [`Self::symmetric_encrypt`].
    ///
    /// # Errors
    ///
    /// `AuthenticationFailed` if any part of the envelope or the key is wrong,
    /// `MalformedCiphertext` if the decrypted bytes are not UTF-8.
    pub fn symmetric_decrypt(
        &self,
        envelope: &EnvelopeCiphertext,
        key: &SymmetricKey,
    ) -> CryptoResult<String> {
        let plaintext = symmetric::decrypt(key, envelope)?;
        Ok(String::from_utf8(plaintext.to_vec())?)
    }

    /// Wrap `key` under the public key.
    ///
    /// # Errors
    ///
    /// `WrapFailed` if the modulus is too small for the configured hash or if OpenSSL fails.
    pub fn asymmetric_wrap(&self, key: &SymmetricKey) -> CryptoResult<WrappedKey> {
        let payload = self.options.wrapped_key_encoding.encode_payload(key);
        let wrapped = ckm_rsa_pkcs_oaep_key_wrap(
            self.key_material.public_key(),
            self.options.oaep_hash,
            &payload,
        )?;
        Ok(WrappedKey::encode(&wrapped))
    }

    /// Unwrap a key wrapped by [`Self::asymmetric_wrap`], raw or hex encoded.
    ///
    /// # Errors
    ///
    /// `UnwrapFailed`, whatever the cause. The cause is only kept in
    /// [`CryptoError::detail`].
    pub fn asymmetric_unwrap(&self, wrapped_key: &WrappedKey) -> CryptoResult<SymmetricKey> {
        let wrapped = wrapped_key.decode(self.key_material.modulus_size())?;
        let payload = ckm_rsa_pkcs_oaep_key_unwrap(
            self.key_material.private_key(),
            self.options.oaep_hash,
            &wrapped,
        )?;
        WrappedKeyEncoding::decode_payload(&payload)
    }

    /// Encrypt `plaintext` under a fresh symmetric key and wrap that key.
    ///
    /// The symmetric key is wiped before returning.
    pub fn seal(&self, plaintext: &str) -> CryptoResult<SealedEnvelope> {
        let key = self.generate_symmetric_key()?;
        let payload = self.symmetric_encrypt(plaintext, &key)?;
        let wrapped_key = self.asymmetric_wrap(&key)?;
        trace!("sealed a payload of {} bytes", plaintext.len());
        Ok(SealedEnvelope {
            wrapped_key,
            payload,
        })
    }

    /// Unwrap the symmetric key, then verify and decrypt the payload.
    pub fn open(&self, wrapped_key: &WrappedKey, payload: &EnvelopeCiphertext) -> CryptoResult<String> {
        let key = self.asymmetric_unwrap(wrapped_key)?;
        let plaintext = self.symmetric_decrypt(payload, &key)?;
        trace!("opened a payload of {} bytes", plaintext.len());
        Ok(plaintext)
    }

    /// [`Self::open`] from the textual forms of both parts.
    ///
    /// The payload is parsed first, so a malformed payload is reported as
    /// `MalformedCiphertext` without touching the private key.
    pub fn open_encoded(&self, wrapped_key: &str, payload: &str) -> CryptoResult<String> {
        let payload: EnvelopeCiphertext = payload.parse()?;
        self.open(&WrappedKey::from(wrapped_key), &payload)
            .inspect_err(|e| match e {
                CryptoError::UnwrapFailed(detail) => debug!("unwrap failed: {detail}"),
                other => debug!("open failed: {other}"),
            })
    }
}
