#![allow(clippy::unwrap_used, clippy::expect_used)]

use actix_web::{
    http::{StatusCode, header},
    test::{self, call_service, read_body},
};
use cosmian_envelope_crypto::crypto::WrappedKeyEncoding;
use cosmian_logger::log_init;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    config::{ClapConfig, EnvelopeConfig, HttpConfig},
    routes::{DECRYPTION_ERROR, VALIDATION_ERROR},
    tests::test_utils::{self, post_json_with_uri},
};

const ENCRYPT_URI: &str = "/get-encrypt-data";
const DECRYPT_URI: &str = "/get-decrypt-data";

fn assert_failure(status: StatusCode, response: &Value, error_code: &str) {
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response,
        &json!({ "successful": false, "error_code": error_code, "data": null })
    );
}

#[tokio::test]
async fn test_encrypt_decrypt_round_trip() {
    log_init(option_env!("RUST_LOG"));
    let app = test_utils::test_app().await;

    let (status, sealed) =
        post_json_with_uri(&app, &json!({ "payload": "Hello, World!" }), ENCRYPT_URI).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sealed["successful"], true);
    assert_eq!(sealed["error_code"], "");
    let wrapped_key = sealed["data"]["wrapped_key"].as_str().unwrap();
    let payload = sealed["data"]["payload"].as_str().unwrap();
    // base64 of a 2048 bits RSA output
    assert_eq!(wrapped_key.len(), 344);
    assert_eq!(payload.split(':').count(), 3);

    let (status, opened) = post_json_with_uri(
        &app,
        &json!({ "wrapped_key": wrapped_key, "payload": payload }),
        DECRYPT_URI,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        opened,
        json!({ "successful": true, "error_code": "", "data": { "plaintext": "Hello, World!" } })
    );
}

#[tokio::test]
async fn test_decrypt_accepts_legacy_field_names() {
    log_init(option_env!("RUST_LOG"));
    let app = test_utils::test_app().await;

    let (_, sealed) =
        post_json_with_uri(&app, &json!({ "payload": "legacy client" }), ENCRYPT_URI).await;
    let (status, opened) = post_json_with_uri(
        &app,
        &json!({ "data1": sealed["data"]["wrapped_key"], "data2": sealed["data"]["payload"] }),
        DECRYPT_URI,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(opened["data"]["plaintext"], "legacy client");
}

#[tokio::test]
async fn test_payload_length_limit() {
    log_init(option_env!("RUST_LOG"));
    let app = test_utils::test_app().await;

    for payload in [String::new(), "é".repeat(2000), "a".repeat(2000)] {
        let (status, sealed) =
            post_json_with_uri(&app, &json!({ "payload": payload }), ENCRYPT_URI).await;
        assert_eq!(status, StatusCode::OK);
        let (_, opened) = post_json_with_uri(&app, &sealed["data"], DECRYPT_URI).await;
        assert_eq!(opened["data"]["plaintext"], payload.as_str());
    }

    let (status, response) =
        post_json_with_uri(&app, &json!({ "payload": "a".repeat(2001) }), ENCRYPT_URI).await;
    assert_failure(status, &response, VALIDATION_ERROR);
}

#[tokio::test]
async fn test_invalid_requests() {
    log_init(option_env!("RUST_LOG"));
    let app = test_utils::test_app().await;

    let (status, response) = post_json_with_uri(&app, &json!({}), ENCRYPT_URI).await;
    assert_failure(status, &response, VALIDATION_ERROR);

    let (status, response) = post_json_with_uri(&app, &json!({ "payload": 42 }), ENCRYPT_URI).await;
    assert_failure(status, &response, VALIDATION_ERROR);

    let (status, response) =
        post_json_with_uri(&app, &json!({ "wrapped_key": "abc" }), DECRYPT_URI).await;
    assert_failure(status, &response, VALIDATION_ERROR);

    let req = test::TestRequest::post()
        .uri(ENCRYPT_URI)
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{ not json")
        .to_request();
    let res = call_service(&app, req).await;
    let status = res.status();
    let response: Value = serde_json::from_slice(&read_body(res).await).unwrap();
    assert_failure(status, &response, VALIDATION_ERROR);
}

#[tokio::test]
async fn test_decryption_failures_are_indistinguishable() {
    log_init(option_env!("RUST_LOG"));
    let app = test_utils::test_app().await;

    let (_, sealed) = post_json_with_uri(&app, &json!({ "payload": "secret" }), ENCRYPT_URI).await;
    let wrapped_key = sealed["data"]["wrapped_key"].as_str().unwrap().to_owned();
    let payload = sealed["data"]["payload"].as_str().unwrap().to_owned();

    // flip the last hex digit of the ciphertext
    let mut tampered_payload = payload.clone();
    let last = tampered_payload.pop().unwrap();
    tampered_payload.push(if last == '0' { '1' } else { '0' });

    // a valid base64 string of the right length, but not an RSA-OAEP output
    let forged_wrapped_key = format!("{}==", "A".repeat(wrapped_key.len() - 2));

    let cases = [
        (wrapped_key.clone(), tampered_payload),
        (wrapped_key.clone(), "abc".to_owned()),
        (wrapped_key.clone(), "00:11:22".to_owned()),
        (wrapped_key.clone(), String::new()),
        (forged_wrapped_key, payload.clone()),
        ("not base64!".to_owned(), payload.clone()),
        (String::new(), payload),
    ];
    for (wrapped_key, payload) in cases {
        let (status, response) = post_json_with_uri(
            &app,
            &json!({ "wrapped_key": wrapped_key, "payload": payload }),
            DECRYPT_URI,
        )
        .await;
        assert_failure(status, &response, DECRYPTION_ERROR);
    }
}

#[tokio::test]
async fn test_hex_wrapped_key_encoding() {
    log_init(option_env!("RUST_LOG"));
    let clap_config = ClapConfig {
        envelope: EnvelopeConfig {
            wrapped_key_encoding: WrappedKeyEncoding::Hex,
            ..Default::default()
        },
        ..test_utils::test_clap_config()
    };
    let hex_app = test_utils::test_app_with_clap_config(clap_config).await;
    let raw_app = test_utils::test_app().await;

    let (status, sealed) =
        post_json_with_uri(&hex_app, &json!({ "payload": "hex key" }), ENCRYPT_URI).await;
    assert_eq!(status, StatusCode::OK);

    // both encodings are accepted when opening
    let (_, opened) = post_json_with_uri(&raw_app, &sealed["data"], DECRYPT_URI).await;
    assert_eq!(opened["data"]["plaintext"], "hex key");
}

#[tokio::test]
async fn test_correlation_id() {
    log_init(option_env!("RUST_LOG"));
    let app = test_utils::test_app().await;

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("x-correlation-id", "order-42"))
        .to_request();
    let res = call_service(&app, req).await;
    assert_eq!(res.headers().get("x-correlation-id").unwrap(), "order-42");

    let req = test::TestRequest::get().uri("/health").to_request();
    let res = call_service(&app, req).await;
    let generated = res.headers().get("x-correlation-id").unwrap();
    Uuid::parse_str(generated.to_str().unwrap()).unwrap();

    // the id is also set on failures
    let req = test::TestRequest::post()
        .uri(ENCRYPT_URI)
        .insert_header(("x-correlation-id", "failing-request"))
        .set_json(json!({}))
        .to_request();
    let res = call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.headers().get("x-correlation-id").unwrap(),
        "failing-request"
    );
}

#[tokio::test]
async fn test_security_headers() {
    log_init(option_env!("RUST_LOG"));
    let app = test_utils::test_app().await;

    let req = test::TestRequest::post()
        .uri(ENCRYPT_URI)
        .set_json(json!({ "payload": "headers" }))
        .to_request();
    let res = call_service(&app, req).await;
    let headers = res.headers();
    assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
    assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
    assert_eq!(headers.get(header::REFERRER_POLICY).unwrap(), "no-referrer");
}

#[tokio::test]
async fn test_cors() {
    log_init(option_env!("RUST_LOG"));

    // no configured origin: any origin is accepted
    let app = test_utils::test_app().await;
    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header((header::ORIGIN, "https://any.example.com"))
        .to_request();
    let res = call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    let exposed = res
        .headers()
        .get(header::ACCESS_CONTROL_EXPOSE_HEADERS)
        .unwrap()
        .to_str()
        .unwrap()
        .to_lowercase();
    assert!(exposed.contains("x-correlation-id"));
    assert!(exposed.contains("content-disposition"));

    // restricted origins
    let clap_config = ClapConfig {
        http: HttpConfig {
            allow_origin: vec!["https://app.example.com/".to_owned()],
            ..Default::default()
        },
        ..test_utils::test_clap_config()
    };
    let app = test_utils::test_app_with_clap_config(clap_config).await;

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header((header::ORIGIN, "https://app.example.com"))
        .to_request();
    let res = call_service(&app, req).await;
    assert_eq!(
        res.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "https://app.example.com"
    );

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header((header::ORIGIN, "https://evil.example.com"))
        .to_request();
    let res = call_service(&app, req).await;
    assert!(!res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
