use std::{sync::Arc, time::Duration};

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    body::MessageBody,
    dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse},
    http::header::{self, HeaderName},
    middleware::DefaultHeaders,
    web::{Data, JsonConfig},
};
use tracing::info;

use crate::{
    config::{HttpParams, ServerParams},
    core::EnvelopeService,
    error::EnvelopeError,
    middlewares::{CORRELATION_ID_HEADER, TraceRequests},
    result::{EResult, EResultHelper},
    routes,
};

/// Lower bound of the JSON body limit, large enough for any decrypt request
const MIN_JSON_LIMIT: usize = 65_536;

/// Start the envelope encryption server and run it until it stops.
///
/// # Errors
///
/// Fails if the server cannot bind its address or stops on an error.
pub async fn start_envelope_server(server_params: ServerParams) -> EResult<()> {
    let service = Arc::new(EnvelopeService::instantiate(server_params));
    let server = prepare_envelope_server(service.clone())?;

    info!(
        "Starting the envelope encryption server on {:?}...",
        service.http_params
    );

    // Run the server and return the result
    server.await.map_err(Into::into)
}

/// Prepare the HTTP server, bound to the configured address.
///
/// # Errors
///
/// Fails if the address cannot be bound.
pub fn prepare_envelope_server(service: Arc<EnvelopeService>) -> EResult<Server> {
    let address = format!(
        "{}:{}",
        service.http_params.hostname, service.http_params.port
    );

    let server = HttpServer::new(move || envelope_app(service.clone()))
        .keep_alive(actix_web::http::KeepAlive::Timeout(Duration::from_secs(120)))
        .client_request_timeout(Duration::from_secs(10));

    Ok(server
        .bind(&address)
        .with_context(|| format!("cannot bind the server to {address}"))?
        .run())
}

/// The application: routes, body limits and middlewares
pub(crate) fn envelope_app(
    service: Arc<EnvelopeService>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let json_limit = MIN_JSON_LIMIT.max(service.max_payload_length.saturating_mul(16));
    let cors = cors(&service.http_params);

    App::new()
        .app_data(Data::new(service))
        .app_data(
            JsonConfig::default()
                .limit(json_limit)
                .error_handler(|err, _req| EnvelopeError::InvalidRequest(err.to_string()).into()),
        )
        .service(routes::get_version)
        .service(routes::get_health)
        .service(routes::encryption::get_encrypt_data)
        .service(routes::encryption::get_decrypt_data)
        .wrap(cors)
        .wrap(
            DefaultHeaders::new()
                .add((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
                .add((header::X_FRAME_OPTIONS, "DENY"))
                .add((header::REFERRER_POLICY, "no-referrer")),
        )
        .wrap(TraceRequests)
}

fn cors(http_params: &HttpParams) -> Cors {
    let cors = if http_params.allows_any_origin() {
        Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
    } else {
        http_params
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(["GET", "POST", "OPTIONS"])
            .allowed_headers([
                header::CONTENT_TYPE,
                header::ACCEPT,
                HeaderName::from_static(CORRELATION_ID_HEADER),
            ])
    };
    cors.expose_headers([
        HeaderName::from_static(CORRELATION_ID_HEADER),
        header::CONTENT_DISPOSITION,
    ])
    .max_age(3600)
}
