use std::{fmt, fs, path::Path};

use cosmian_logger::{debug, warn};
use openssl::{
    pkey::{Id, PKey, Private, Public},
    rsa::Rsa,
};
use zeroize::Zeroizing;

use crate::{CryptoError, CryptoResult};

/// Modulus size under which a warning is logged when loading a key pair
const RECOMMENDED_MIN_RSA_MODULUS_BITS: u32 = 2048;

/// The RSA key pair used to wrap and unwrap the symmetric keys.
///
/// Both halves are parsed and checked against each other once, when the
/// process starts. The pair cannot be modified afterwards.
pub struct KeyMaterial {
    public_key: PKey<Public>,
    private_key: PKey<Private>,
}

impl KeyMaterial {
    /// Parse a PEM encoded RSA key pair.
    ///
    /// The public key may be a SPKI (`BEGIN PUBLIC KEY`) or a PKCS#1
    /// (`BEGIN RSA PUBLIC KEY`) document, the private key a PKCS#8
    /// (`BEGIN PRIVATE KEY`) or a PKCS#1 (`BEGIN RSA PRIVATE KEY`) document.
    /// Escaped `\n` sequences, as found in environment variables, are accepted.
    ///
    /// # Errors
    ///
    /// `InvalidKeyEncoding` if either key cannot be parsed, is not an RSA key,
    /// or if the public key is not the public half of the private key.
    pub fn load(public_pem: &str, private_pem: &str) -> CryptoResult<Self> {
        let public_key = parse_public_key(&normalize_pem(public_pem))?;
        let private_key = parse_private_key(&Zeroizing::new(normalize_pem(private_pem)))?;

        if !public_key.public_eq(&private_key) {
            return Err(CryptoError::InvalidKeyEncoding(
                "the public key is not the public half of the private key".to_owned(),
            ));
        }

        if public_key.bits() < RECOMMENDED_MIN_RSA_MODULUS_BITS {
            warn!(
                "the RSA key pair has a modulus of {} bits, less than the recommended {} bits",
                public_key.bits(),
                RECOMMENDED_MIN_RSA_MODULUS_BITS
            );
        }
        debug!("loaded an RSA key pair of {} bits", public_key.bits());

        Ok(Self {
            public_key,
            private_key,
        })
    }

    /// Read the PEM encoded key pair from two files, then [`Self::load`] it.
    ///
    /// # Errors
    ///
    /// `InvalidKeyEncoding` if a file cannot be read or does not hold a valid key.
    pub fn load_from_files(public_key_file: &Path, private_key_file: &Path) -> CryptoResult<Self> {
        let public_pem = read_pem_file(public_key_file)?;
        let private_pem = Zeroizing::new(read_pem_file(private_key_file)?);
        Self::load(&public_pem, &private_pem)
    }

    #[must_use]
    pub const fn public_key(&self) -> &PKey<Public> {
        &self.public_key
    }

    #[must_use]
    pub const fn private_key(&self) -> &PKey<Private> {
        &self.private_key
    }

    /// Size of the RSA modulus in bytes, which is also the size of a wrapped key
    #[must_use]
    pub fn modulus_size(&self) -> usize {
        self.public_key.size()
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("algorithm", &"RSA")
            .field("modulus_bits", &self.public_key.bits())
            .field("private_key", &"[****]")
            .finish()
    }
}

fn read_pem_file(path: &Path) -> CryptoResult<String> {
    fs::read_to_string(path).map_err(|e| {
        CryptoError::InvalidKeyEncoding(format!("cannot read the key file {}: {e}", path.display()))
    })
}

fn normalize_pem(pem: &str) -> String {
    pem.trim().replace("\\n", "\n")
}

fn parse_public_key(pem: &str) -> CryptoResult<PKey<Public>> {
    let public_key = if pem.contains("BEGIN RSA PUBLIC KEY") {
        Rsa::public_key_from_pem_pkcs1(pem.as_bytes()).and_then(PKey::from_rsa)
    } else {
        PKey::public_key_from_pem(pem.as_bytes())
    }
    .map_err(|e| {
        CryptoError::InvalidKeyEncoding(format!("the public key is not a valid PEM key: {e}"))
    })?;

    if public_key.id() != Id::RSA {
        return Err(CryptoError::InvalidKeyEncoding(format!(
            "the public key must be an RSA key, found {:?}",
            public_key.id()
        )));
    }
    Ok(public_key)
}

fn parse_private_key(pem: &str) -> CryptoResult<PKey<Private>> {
    // the error stack of a failed PEM parse never contains the input
    let private_key = PKey::private_key_from_pem(pem.as_bytes()).map_err(|e| {
        CryptoError::InvalidKeyEncoding(format!("the private key is not a valid PEM key: {e}"))
    })?;

    if private_key.id() != Id::RSA {
        return Err(CryptoError::InvalidKeyEncoding(format!(
            "the private key must be an RSA key, found {:?}",
            private_key.id()
        )));
    }
    let consistent = private_key.rsa().and_then(|rsa| rsa.check_key()).map_err(|e| {
        CryptoError::InvalidKeyEncoding(format!("the RSA private key is inconsistent: {e}"))
    })?;
    if !consistent {
        return Err(CryptoError::InvalidKeyEncoding(
            "the RSA private key is inconsistent".to_owned(),
        ));
    }
    Ok(private_key)
}
