//! Tracing middleware attaching a request-scoped trace identifier.
//!
//! Each request runs inside [`TraceId::scope`] with a fresh identifier, so
//! errors built while handling it carry the same id that the response
//! reports in its `trace-id` header. The request method, path, status, and
//! latency are logged once the response is ready.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{error, info};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Tracing middleware attaching a request-scoped UUID and
/// adding a `trace-id` header to every response.
///
/// Handlers can read the trace ID via [`TraceId::current`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use campus_security::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        let method = req.method().clone();
        let path = req.path().to_owned();
        let started = Instant::now();
        let fut = self.service.call(req);
        Box::pin(TraceId::scope(trace_id, async move {
            let mut res = fut.await?;
            match HeaderValue::from_str(&trace_id.to_string()) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(error) => {
                    error!(%error, %trace_id, "failed to encode trace identifier header");
                }
            }
            info!(
                %trace_id,
                %method,
                path = %path,
                status = res.status().as_u16(),
                elapsed = ?started.elapsed(),
                "request handled"
            );
            Ok(res)
        }))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    use super::*;
    use crate::domain::ApiResult;

    async fn call<F, Fut, Res>(handler: F) -> (String, web::Bytes)
    where
        F: Fn() -> Fut + Clone + 'static,
        Fut: std::future::Future<Output = Res> + 'static,
        Res: actix_web::Responder + 'static,
    {
        let app =
            test::init_service(App::new().wrap(Trace).route("/", web::get().to(handler))).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let trace_id = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned();
        (trace_id, test::read_body(res).await)
    }

    #[rstest]
    #[actix_web::test]
    async fn handler_sees_the_header_trace_id() {
        let (trace_id, body) = call(|| async move {
            let id = TraceId::current().expect("trace id in scope");
            HttpResponse::Ok().body(id.to_string())
        })
        .await;
        assert_eq!(body, trace_id.as_bytes());
    }

    #[rstest]
    #[actix_web::test]
    async fn error_bodies_carry_the_header_trace_id() {
        let (trace_id, body) = call(|| async move {
            ApiResult::<HttpResponse>::Err(crate::domain::Error::forbidden("admin access required"))
        })
        .await;
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json error body");
        assert_eq!(payload["traceId"], trace_id.as_str());
    }

    #[rstest]
    #[actix_web::test]
    async fn each_request_gets_a_new_id() {
        let app = test::init_service(
            App::new()
                .wrap(Trace)
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let first = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let second = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_ne!(
            first.headers().get(TRACE_ID_HEADER),
            second.headers().get(TRACE_ID_HEADER)
        );
    }
}
