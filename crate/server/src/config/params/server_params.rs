use std::{fmt, path::Path};

use cosmian_envelope_crypto::crypto::{EnvelopeOptions, KeyMaterial};
use zeroize::Zeroizing;

use super::HttpParams;
use crate::{
    config::{ClapConfig, KeysConfig},
    envelope_ensure,
    error::EnvelopeError,
    result::EResult,
};

/// This structure is the context used by the server
/// while it is running. It is built once at startup
/// and never modified afterwards.
pub struct ServerParams {
    pub http_params: HttpParams,

    /// The maximum number of characters of a payload to encrypt
    pub max_payload_length: usize,

    pub envelope_options: EnvelopeOptions,

    /// The RSA key pair wrapping the symmetric keys
    pub key_material: KeyMaterial,
}

impl ServerParams {
    /// Tries to create a `ServerParams` instance from the given `ClapConfig`.
    ///
    /// The RSA key pair is loaded and checked here: the server
    /// does not start without a usable key pair.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if a key is missing, is given twice
    /// or is invalid, or if the HTTP parameters are invalid.
    pub fn try_from(conf: ClapConfig) -> EResult<Self> {
        let http_params = HttpParams::try_from(&conf.http)?;

        envelope_ensure!(
            conf.envelope.max_payload_length > 0,
            EnvelopeError::Configuration("the maximum payload length must be positive".to_owned())
        );

        let key_material = Self::load_key_material(&conf.keys)?;

        Ok(Self {
            http_params,
            max_payload_length: conf.envelope.max_payload_length,
            envelope_options: conf.envelope.envelope_options(),
            key_material,
        })
    }

    fn load_key_material(keys: &KeysConfig) -> EResult<KeyMaterial> {
        let public_pem = resolve_pem(
            "public",
            keys.rsa_public_key.as_deref(),
            keys.rsa_public_key_file.as_deref(),
        )?;
        let private_pem = resolve_pem(
            "private",
            keys.rsa_private_key.as_deref(),
            keys.rsa_private_key_file.as_deref(),
        )?;
        KeyMaterial::load(&public_pem, &private_pem)
            .map_err(|e| EnvelopeError::Configuration(format!("invalid RSA key pair: {e}")))
    }
}

/// Read a PEM key given either inline or as a file
fn resolve_pem(
    which: &str,
    pem: Option<&str>,
    pem_file: Option<&Path>,
) -> EResult<Zeroizing<String>> {
    match (pem, pem_file) {
        (Some(pem), None) => Ok(Zeroizing::new(pem.to_owned())),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map(Zeroizing::new)
            .map_err(|e| {
                EnvelopeError::Configuration(format!(
                    "cannot read the RSA {which} key file {}: {e}",
                    path.display()
                ))
            }),
        (Some(_), Some(_)) => Err(EnvelopeError::Configuration(format!(
            "the RSA {which} key is provided both inline and as a file"
        ))),
        (None, None) => Err(EnvelopeError::Configuration(format!(
            "the RSA {which} key is missing: use --rsa-{which}-key or --rsa-{which}-key-file"
        ))),
    }
}

impl fmt::Debug for ServerParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("")
            .field("envelope_url", &self.http_params)
            .field("max_payload_length", &self.max_payload_length)
            .field("oaep_hash", &self.envelope_options.oaep_hash)
            .field(
                "wrapped_key_encoding",
                &self.envelope_options.wrapped_key_encoding,
            )
            .field("key_material", &self.key_material)
            .finish()
    }
}
