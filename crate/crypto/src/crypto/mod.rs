pub use envelope::{EnvelopeCipher, EnvelopeOptions, SealedEnvelope};
pub use key_material::KeyMaterial;
pub use rsa::{RsaOaepHash, WrappedKey, WrappedKeyEncoding};
pub use symmetric::{EnvelopeCiphertext, SymmetricKey};

pub mod envelope;
pub mod key_material;
pub mod rsa;
pub mod symmetric;
