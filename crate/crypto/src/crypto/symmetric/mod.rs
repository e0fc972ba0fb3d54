pub use aes_256_gcm::{decrypt, encrypt, random_nonce};
pub use envelope_ciphertext::EnvelopeCiphertext;
pub use symmetric_key::SymmetricKey;

mod aes_256_gcm;
mod envelope_ciphertext;
mod symmetric_key;


/// AES 256 GCM key length in bytes.
pub const AES_256_GCM_KEY_LENGTH: usize = 32;
/// AES 256 GCM nonce length in bytes.
pub const AES_256_GCM_IV_LENGTH: usize = 12;
/// AES 256 GCM tag/mac length in bytes.
pub const AES_256_GCM_MAC_LENGTH: usize = 16;
