use cosmian_logger::trace;
use openssl::{
    rand::rand_bytes,
    symm::{Cipher, decrypt_aead, encrypt_aead},
};
use zeroize::Zeroizing;

use super::{
    AES_256_GCM_IV_LENGTH, AES_256_GCM_MAC_LENGTH, EnvelopeCiphertext, SymmetricKey,
};
use crate::{CryptoError, CryptoResult, CryptoResultHelper};

/// Generate a random nonce for AES-256-GCM.
pub fn random_nonce() -> CryptoResult<[u8; AES_256_GCM_IV_LENGTH]> {
    let mut nonce = [0; AES_256_GCM_IV_LENGTH];
    rand_bytes(&mut nonce).context("nonce generation")?;
    Ok(nonce)
}

/// Encrypt `plaintext` under `key` with a fresh random nonce. No additional data is authenticated.
pub fn encrypt(key: &SymmetricKey, plaintext: &[u8]) -> CryptoResult<EnvelopeCiphertext> {
    let nonce = random_nonce()?;
    let mut tag = [0; AES_256_GCM_MAC_LENGTH];
    let ciphertext = encrypt_aead(
        Cipher::aes_256_gcm(),
        key.as_bytes(),
        Some(&nonce),
        &[],
        plaintext,
        &mut tag,
    )?;
    Ok(EnvelopeCiphertext::new(nonce, tag, ciphertext))
}

/// Verify the tag then decrypt.
///
/// Any verification failure is reported as `AuthenticationFailed`,
/// whatever part of the envelope was altered.
pub fn decrypt(
    key: &SymmetricKey,
    envelope: &EnvelopeCiphertext,
) -> CryptoResult<Zeroizing<Vec<u8>>> {
    decrypt_aead(
        Cipher::aes_256_gcm(),
        key.as_bytes(),
        Some(envelope.nonce()),
        &[],
        envelope.ciphertext(),
        envelope.tag(),
    )
    .map(Zeroizing::new)
    .map_err(|e| {
        trace!("AES-256-GCM decryption failed: {e}");
        CryptoError::AuthenticationFailed
    })
}
