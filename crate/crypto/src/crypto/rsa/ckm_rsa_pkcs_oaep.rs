//! Implements the RSA Key Encryption Mechanism `CKM_RSA_PKCS_OAEP`
//! a.k.a PKCS #1 RSA OAEP as specified in PKCS#11 v2.40 available at
//! <http://docs.oasis-open.org/pkcs11/pkcs11-curr/v2.40/cos01/pkcs11-curr-v2.40-cos01.html>#_Toc408226895
//!
//! It is used here to wrap the single use AES keys of the envelopes.
use openssl::{
    pkey::{PKey, Private, Public},
    pkey_ctx::PkeyCtx,
    rsa::Padding,
};
use zeroize::Zeroizing;

use super::RsaOaepHash;
use crate::{CryptoError, CryptoResult};

/// The maximum length of a key wrapped under a modulus of `modulus_size` bytes:
/// `k-2-2*hLen` where `hLen` is the length in octets of the hash function output
#[must_use]
pub const fn max_wrappable_length(modulus_size: usize, hash_fn: RsaOaepHash) -> usize {
    modulus_size.saturating_sub(2 + 2 * hash_fn.output_size())
}

/// Key Wrap using `CKM_RSA_PKCS_OAEP`
///
/// The output length is the same as the modulus length.
///
/// Arguments:
/// - `pub_key`: the public key used to wrap the key
/// - `hash_fn`: the hash function to use for OAEP and MGF1
/// - `key_to_wrap`: the data encryption key to wrap
pub fn ckm_rsa_pkcs_oaep_key_wrap(
    pub_key: &PKey<Public>,
    hash_fn: RsaOaepHash,
    key_to_wrap: &[u8],
) -> CryptoResult<Vec<u8>> {
    let modulus_size = pub_key.size();
    let max_length = max_wrappable_length(modulus_size, hash_fn);
    if key_to_wrap.len() > max_length {
        return Err(CryptoError::WrapFailed(format!(
            "a {} bits RSA key with OAEP {hash_fn} can wrap at most {max_length} bytes, got {} bytes",
            pub_key.bits(),
            key_to_wrap.len()
        )));
    }

    let wrap = || -> Result<Vec<u8>, openssl::error::ErrorStack> {
        let mut ctx = PkeyCtx::new(pub_key)?;
        ctx.encrypt_init()?;
        ctx.set_rsa_padding(Padding::PKCS1_OAEP)?;
        ctx.set_rsa_oaep_md(hash_fn.to_md())?;
        ctx.set_rsa_mgf1_md(hash_fn.to_md())?;
        // The ciphertext has the same length as the modulus.
        let mut ciphertext = Vec::with_capacity(modulus_size);
        ctx.encrypt_to_vec(key_to_wrap, &mut ciphertext)?;
        Ok(ciphertext)
    };
    wrap().map_err(|e| CryptoError::WrapFailed(format!("RSA OAEP encryption error: {e}")))
}

/// Key Unwrap using `CKM_RSA_PKCS_OAEP`
///
/// The wrapped key must be exactly as long as the RSA modulus.
/// Every failure is reported as `UnwrapFailed`.
///
/// Arguments:
/// - `priv_key`: the private key used to unwrap the key
/// - `hash_fn`: the hash function to use for OAEP and MGF1
/// - `wrapped_key`: the key to unwrap
pub fn ckm_rsa_pkcs_oaep_key_unwrap(
    priv_key: &PKey<Private>,
    hash_fn: RsaOaepHash,
    wrapped_key: &[u8],
) -> CryptoResult<Zeroizing<Vec<u8>>> {
    let modulus_size = priv_key.size();
    if wrapped_key.len() != modulus_size {
        return Err(CryptoError::UnwrapFailed(format!(
            "the wrapped key must be {modulus_size} bytes long, got {} bytes",
            wrapped_key.len()
        )));
    }

    let unwrap = || -> Result<Zeroizing<Vec<u8>>, openssl::error::ErrorStack> {
        let mut ctx = PkeyCtx::new(priv_key)?;
        ctx.decrypt_init()?;
        ctx.set_rsa_padding(Padding::PKCS1_OAEP)?;
        ctx.set_rsa_oaep_md(hash_fn.to_md())?;
        ctx.set_rsa_mgf1_md(hash_fn.to_md())?;
        let mut plaintext = Zeroizing::new(Vec::with_capacity(
            max_wrappable_length(modulus_size, hash_fn),
        ));
        ctx.decrypt_to_vec(wrapped_key, &mut plaintext)?;
        Ok(plaintext)
    };
    unwrap().map_err(|e| CryptoError::UnwrapFailed(format!("RSA OAEP decryption error: {e}")))
}
