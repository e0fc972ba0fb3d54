use std::sync::Arc;

use actix_web::{
    post,
    web::{Data, Json},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{core::EnvelopeService, result::EResult, routes::ApiResponse};

#[derive(Debug, Serialize, Deserialize)]
pub struct EncryptRequest {
    pub payload: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EncryptResponse {
    /// Base64 of the RSA-OAEP wrapped symmetric key
    pub wrapped_key: String,
    /// `hex(nonce):hex(tag):hex(ciphertext)`
    pub payload: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DecryptRequest {
    #[serde(alias = "data1")]
    pub wrapped_key: String,
    #[serde(alias = "data2")]
    pub payload: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecryptResponse {
    pub plaintext: String,
}

/// Seal a payload
#[post("/get-encrypt-data")]
pub(crate) async fn get_encrypt_data(
    request: Json<EncryptRequest>,
    service: Data<Arc<EnvelopeService>>,
) -> EResult<Json<ApiResponse<EncryptResponse>>> {
    debug!("sealing a payload");
    let sealed = service.encrypt(&request.payload)?;
    Ok(Json(ApiResponse::success(EncryptResponse {
        wrapped_key: sealed.wrapped_key.to_string(),
        payload: sealed.payload.to_string(),
    })))
}

/// Open a sealed payload
#[post("/get-decrypt-data")]
pub(crate) async fn get_decrypt_data(
    request: Json<DecryptRequest>,
    service: Data<Arc<EnvelopeService>>,
) -> EResult<Json<ApiResponse<DecryptResponse>>> {
    debug!("opening an envelope");
    let DecryptRequest {
        wrapped_key,
        payload,
    } = request.into_inner();
    let plaintext = service.decrypt(&wrapped_key, &payload)?;
    Ok(Json(ApiResponse::success(DecryptResponse { plaintext })))
}
