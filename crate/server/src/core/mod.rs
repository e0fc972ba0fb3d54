use cosmian_envelope_crypto::crypto::{EnvelopeCipher, SealedEnvelope};
use tracing::debug;

use crate::{
    config::{HttpParams, ServerParams},
    envelope_ensure,
    error::EnvelopeError,
    result::EResult,
};

/// The envelope encryption service.
///
/// A single instance is built at startup and shared, read only,
/// by all the HTTP workers.
#[derive(Debug)]
pub struct EnvelopeService {
    pub(crate) http_params: HttpParams,
    pub(crate) max_payload_length: usize,
    cipher: EnvelopeCipher,
}

impl EnvelopeService {
    #[must_use]
    pub fn instantiate(server_params: ServerParams) -> Self {
        let ServerParams {
            http_params,
            max_payload_length,
            envelope_options,
            key_material,
        } = server_params;
        let cipher = EnvelopeCipher::with_options(key_material, envelope_options);
        debug!(
            "envelope cipher: {:?}, options: {:?}",
            cipher.key_material(),
            cipher.options()
        );
        Self {
            http_params,
            max_payload_length,
            cipher,
        }
    }

    /// Seal a payload of at most `max_payload_length` characters.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` if the payload is too long, a crypto error if sealing fails.
    pub fn encrypt(&self, payload: &str) -> EResult<SealedEnvelope> {
        let length = payload.chars().count();
        envelope_ensure!(
            length <= self.max_payload_length,
            EnvelopeError::InvalidRequest(format!(
                "the payload is {length} characters long, the maximum is {}",
                self.max_payload_length
            ))
        );
        debug!("sealing a payload of {length} characters");
        Ok(self.cipher.seal(payload)?)
    }

    /// Open an envelope from the textual forms of its wrapped key and payload.
    ///
    /// # Errors
    ///
    /// A crypto error if the envelope is malformed or cannot be authenticated.
    pub fn decrypt(&self, wrapped_key: &str, payload: &str) -> EResult<String> {
        Ok(self.cipher.open_encoded(wrapped_key, payload)?)
    }
}
