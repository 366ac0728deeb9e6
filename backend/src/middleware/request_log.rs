//! Request logging middleware.
//!
//! Emits one `info` event when a request starts and one when it completes,
//! carrying method, path, status, elapsed milliseconds and the trace id.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{info, warn};

use crate::domain::TraceId;

/// Logs the start and completion of every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestLogging;

impl<S, B> Transform<S, ServiceRequest> for RequestLogging
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggingMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggingMiddleware { service }))
    }
}

/// Service wrapper produced by [`RequestLogging`].
pub struct RequestLoggingMiddleware<S> {
    service: S,
}

fn trace_label() -> String {
    TraceId::current().map_or_else(String::new, |id| id.to_string())
}

impl<S, B> Service<ServiceRequest> for RequestLoggingMiddleware<S>
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
        let method = req.method().to_string();
        let path = req.path().to_owned();
        let started = Instant::now();
        let fut = self.service.call(req);

        Box::pin(async move {
            let trace_id = trace_label();
            info!(%method, %path, %trace_id, "HTTP {method} {path} started");

            let outcome = fut.await;
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            match &outcome {
                Ok(res) => {
                    let status = res.status().as_u16();
                    info!(
                        %method,
                        %path,
                        status,
                        elapsed_ms,
                        %trace_id,
                        "HTTP {method} {path} responded {status} in {elapsed_ms}ms"
                    );
                }
                Err(error) => {
                    warn!(
                        %method,
                        %path,
                        %error,
                        elapsed_ms,
                        %trace_id,
                        "HTTP {method} {path} failed in {elapsed_ms}ms"
                    );
                }
            }
            outcome
        })
    }
}
