use actix_web::{
    HttpResponse, HttpResponseBuilder, get,
    http::StatusCode,
    web::Json,
};
use clap::crate_version;
use cosmian_envelope_crypto::CryptoError;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::EnvelopeError;

pub mod encryption;

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const ENCRYPTION_ERROR: &str = "ENCRYPTION_ERROR";
pub const DECRYPTION_ERROR: &str = "DECRYPTION_ERROR";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// The envelope of every answer of the encryption endpoints
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub successful: bool,
    pub error_code: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            successful: true,
            error_code: String::new(),
            data: Some(data),
        }
    }

    pub fn failure(error_code: &str) -> Self {
        Self {
            successful: false,
            error_code: error_code.to_owned(),
            data: None,
        }
    }
}

impl EnvelopeError {
    /// The error code sent to the client.
    ///
    /// All the failures to open an envelope share `DECRYPTION_ERROR`.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => VALIDATION_ERROR,
            Self::Crypto(CryptoError::WrapFailed(_)) => ENCRYPTION_ERROR,
            Self::Crypto(
                CryptoError::MalformedCiphertext(_)
                | CryptoError::AuthenticationFailed
                | CryptoError::UnwrapFailed(_),
            ) => DECRYPTION_ERROR,
            Self::Crypto(
                CryptoError::InvalidKeyEncoding(_)
                | CryptoError::UnsupportedParameter(_)
                | CryptoError::InternalCryptoFailure(_),
            )
            | Self::Configuration(_)
            | Self::ServerError(_)
            | Self::Io(_) => INTERNAL_ERROR,
        }
    }
}

impl actix_web::error::ResponseError for EnvelopeError {
    fn status_code(&self) -> StatusCode {
        match self.error_code() {
            INTERNAL_ERROR => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_code = self.error_code();
        let message = match self {
            Self::Crypto(e) => format!("{} - {}", e.code(), e.detail().unwrap_or_default()),
            other => other.to_string(),
        };

        if status_code >= StatusCode::INTERNAL_SERVER_ERROR {
            error!("{status_code} {error_code} - {message}");
        } else {
            warn!("{status_code} {error_code} - {message}");
        }

        HttpResponseBuilder::new(status_code).json(ApiResponse::<()>::failure(error_code))
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
}

/// Get the server version
#[get("/version")]
pub(crate) async fn get_version() -> Json<String> {
    Json(format!(
        "{} ({})",
        crate_version!().to_owned(),
        openssl::version::version()
    ))
}

/// Liveness probe
#[get("/health")]
pub(crate) async fn get_health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "UP".to_owned(),
    })
}
