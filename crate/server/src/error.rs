use cosmian_envelope_crypto::CryptoError;
use thiserror::Error;

// Each error type must have a corresponding HTTP status code (see `routes/mod.rs`)
#[derive(Error, Debug)]
pub enum EnvelopeError {
    // Missing or invalid fields in the request
    #[error("Invalid Request: {0}")]
    InvalidRequest(String),

    // The server cannot start with the provided configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    // A failure of the envelope encryption engine
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    // Any errors related to a bad behavior of the server but not related to the user input
    #[error("Unexpected server error: {0}")]
    ServerError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for EnvelopeError {
    fn from(e: toml::de::Error) -> Self {
        Self::Configuration(e.to_string())
    }
}

impl From<cosmian_logger::reexport::tracing_subscriber::util::TryInitError> for EnvelopeError {
    fn from(e: cosmian_logger::reexport::tracing_subscriber::util::TryInitError) -> Self {
        Self::ServerError(format!("cannot initialize the logging: {e}"))
    }
}

/// Return early with an error if a condition is not satisfied.
///
/// This macro is equivalent to `if !$cond { return Err(From::from($err)); }`.
#[macro_export]
macro_rules! envelope_ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($crate::envelope_error!($msg));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return ::core::result::Result::Err($crate::envelope_error!($fmt, $($arg)*));
        }
    };
}

/// Construct a server error from a string.
#[macro_export]
macro_rules! envelope_error {
    ($msg:literal) => {
        $crate::error::EnvelopeError::ServerError(::core::format_args!($msg).to_string())
    };
    ($err:expr $(,)?) => ({
        $crate::error::EnvelopeError::ServerError($err.to_string())
    });
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::EnvelopeError::ServerError(::core::format_args!($fmt, $($arg)*).to_string())
    };
}

/// Return early with an error if a condition is not satisfied.
#[macro_export]
macro_rules! envelope_bail {
    ($msg:literal) => {
        return ::core::result::Result::Err($crate::envelope_error!($msg))
    };
    ($err:expr $(,)?) => {
        return ::core::result::Result::Err($err)
    };
    ($fmt:expr, $($arg:tt)*) => {
        return ::core::result::Result::Err($crate::envelope_error!($fmt, $($arg)*))
    };
}
