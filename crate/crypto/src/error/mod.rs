use std::string::FromUtf8Error;

use thiserror::Error;

pub(crate) mod result;

/// Failures of the envelope encryption engine.
///
/// The `Display` form of `AuthenticationFailed` and `UnwrapFailed` never
/// carries details: the cause of an unwrap failure is only available through
/// [`CryptoError::detail`] for server side logging.
#[derive(Error, Debug)]
pub enum CryptoError {
    // The configured key pair cannot be used. Fatal at startup.
    #[error("Invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    // The input does not parse into `nonce:tag:ciphertext`
    #[error("Malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    #[error("Authentication failed: the ciphertext cannot be verified")]
    AuthenticationFailed,

    #[error("Key wrapping failed: {0}")]
    WrapFailed(String),

    #[error("Key unwrapping failed")]
    UnwrapFailed(String),

    // An algorithm or encoding name that is not supported
    #[error("Unsupported parameter: {0}")]
    UnsupportedParameter(String),

    // Unexpected failure of a primitive (RNG, OpenSSL context, ...)
    #[error("Internal crypto failure: {0}")]
    InternalCryptoFailure(String),
}

impl CryptoError {
    /// A stable, machine readable code for this error
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidKeyEncoding(_) => "INVALID_KEY_ENCODING",
            Self::MalformedCiphertext(_) => "MALFORMED_CIPHERTEXT",
            Self::AuthenticationFailed => "AUTHENTICATION_FAILED",
            Self::WrapFailed(_) => "WRAP_FAILED",
            Self::UnwrapFailed(_) => "UNWRAP_FAILED",
            Self::UnsupportedParameter(_) => "UNSUPPORTED_PARAMETER",
            Self::InternalCryptoFailure(_) => "INTERNAL_CRYPTO_FAILURE",
        }
    }

    /// The internal cause of the failure, for logging only.
    ///
    /// Never contains key material nor plaintext.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::AuthenticationFailed => None,
            Self::InvalidKeyEncoding(s)
            | Self::MalformedCiphertext(s)
            | Self::WrapFailed(s)
            | Self::UnwrapFailed(s)
            | Self::UnsupportedParameter(s)
            | Self::InternalCryptoFailure(s) => Some(s),
        }
    }
}

impl From<openssl::error::ErrorStack> for CryptoError {
    fn from(e: openssl::error::ErrorStack) -> Self {
        Self::InternalCryptoFailure(format!("OpenSSL Error: {e}. Details: {e:?}"))
    }
}

impl From<FromUtf8Error> for CryptoError {
    fn from(e: FromUtf8Error) -> Self {
        Self::MalformedCiphertext(format!("the decrypted payload is not valid UTF-8: {e}"))
    }
}

/// Return early with an error if a condition is not satisfied.
///
/// This macro is equivalent to `if !$cond { return Err(From::from($err)); }`.
#[macro_export]
macro_rules! crypto_ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($crate::crypto_error!($msg));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return ::core::result::Result::Err($crate::crypto_error!($fmt, $($arg)*));
        }
    };
}

/// Construct an internal crypto failure from a string.
#[macro_export]
macro_rules! crypto_error {
    ($msg:literal) => {
        $crate::CryptoError::InternalCryptoFailure(::core::format_args!($msg).to_string())
    };
    ($err:expr $(,)?) => ({
        $crate::CryptoError::InternalCryptoFailure($err.to_string())
    });
    ($fmt:expr, $($arg:tt)*) => {
        $crate::CryptoError::InternalCryptoFailure(::core::format_args!($fmt, $($arg)*).to_string())
    };
}

/// Return early with an error if a condition is not satisfied.
#[macro_export]
macro_rules! crypto_bail {
    ($msg:literal) => {
        return ::core::result::Result::Err($crate::crypto_error!($msg))
    };
    ($err:expr $(,)?) => {
        return ::core::result::Result::Err($err)
    };
    ($fmt:expr, $($arg:tt)*) => {
        return ::core::result::Result::Err($crate::crypto_error!($fmt, $($arg)*))
    };
}
