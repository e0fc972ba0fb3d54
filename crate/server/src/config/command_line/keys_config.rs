use std::{fmt, path::PathBuf};

use clap::Args;
use serde::{Deserialize, Serialize};

/// The RSA key pair, as PEM strings or as PEM files.
///
/// For each half, either the PEM string or the file must be provided.
#[derive(Args, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeysConfig {
    /// The RSA public key in PEM format (SPKI or PKCS#1)
    #[clap(long, env = "ENVELOPE_RSA_PUBLIC_KEY", hide_env_values = true)]
    pub rsa_public_key: Option<String>,

    /// The RSA private key in PEM format (PKCS#8 or PKCS#1)
    #[clap(long, env = "ENVELOPE_RSA_PRIVATE_KEY", hide_env_values = true)]
    pub rsa_private_key: Option<String>,

    /// A file holding the RSA public key in PEM format
    #[clap(long, env = "ENVELOPE_RSA_PUBLIC_KEY_FILE")]
    pub rsa_public_key_file: Option<PathBuf>,

    /// A file holding the RSA private key in PEM format
    #[clap(long, env = "ENVELOPE_RSA_PRIVATE_KEY_FILE")]
    pub rsa_private_key_file: Option<PathBuf>,
}

impl fmt::Debug for KeysConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |pem: &Option<String>| pem.as_ref().map(|_| "[****]");
        f.debug_struct("KeysConfig")
            .field("rsa_public_key", &redact(&self.rsa_public_key))
            .field("rsa_private_key", &redact(&self.rsa_private_key))
            .field("rsa_public_key_file", &self.rsa_public_key_file)
            .field("rsa_private_key_file", &self.rsa_private_key_file)
            .finish()
    }
}
