use std::{
    pin::Pin,
    rc::Rc,
    task::{Context, Poll},
};

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
};
use futures::{
    Future,
    future::{Ready, ok},
};
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

pub(crate) const CORRELATION_ID_HEADER: &str = "x-correlation-id";

const MAX_CORRELATION_ID_LENGTH: usize = 128;

/// Tag each request with a correlation id and log it.
///
/// The id is taken from the `x-correlation-id` request header, or generated.
/// It is attached to every log line emitted while the request is served
/// and echoed in the response headers.
#[derive(Clone)]
pub(crate) struct TraceRequests;

impl<S, B> Transform<S, ServiceRequest> for TraceRequests
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = TraceRequestsMiddleware<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(TraceRequestsMiddleware {
            service: Rc::new(service),
        })
    }
}

pub(crate) struct TraceRequestsMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for TraceRequestsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;
    type Response = ServiceResponse<B>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let correlation_id = req
            .headers()
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|id| is_valid_correlation_id(id))
            .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned);
        let method = req.method().clone();
        let path = req.path().to_owned();
        let span = info_span!("request", correlation_id = %correlation_id);

        let service = self.service.clone();

        Box::pin(
            async move {
                match service.call(req).await {
                    Ok(mut res) => {
                        info!("[{}] {} => {}", method, path, res.status());
                        if let Ok(value) = HeaderValue::from_str(&correlation_id) {
                            res.headers_mut()
                                .insert(HeaderName::from_static(CORRELATION_ID_HEADER), value);
                        }
                        Ok(res)
                    }
                    Err(err) => {
                        info!("[{}] {} => internal error: {}", method, path, err);
                        Err(err)
                    }
                }
            }
            .instrument(span),
        )
    }
}

// a client supplied id ends up in the logs and in a response header
fn is_valid_correlation_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_CORRELATION_ID_LENGTH
        && id.bytes().all(|b| b.is_ascii_graphic())
}

#[cfg(test)]
mod tests {
    use super::is_valid_correlation_id;

    #[test]
    fn test_correlation_id_validation() {
        assert!(is_valid_correlation_id("3f1c2a4e-5b6d-4e7f-8a9b-0c1d2e3f4a5b"));
        assert!(is_valid_correlation_id("order-42"));
        assert!(!is_valid_correlation_id(""));
        assert!(!is_valid_correlation_id("with space"));
        assert!(!is_valid_correlation_id("line\nbreak"));
        assert!(!is_valid_correlation_id(&"a".repeat(129)));
    }
}
