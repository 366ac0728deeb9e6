//! Error-mapping middleware.
//!
//! Sits inside [`crate::middleware::Trace`] and intercepts every failure the
//! pipeline produces: handler errors, framework errors (bad JSON, unmatched
//! routes) and panics. Each becomes a [`ProblemDetails`] document carrying
//! the request path as `instance`. Faults are logged once here at `error`;
//! expected failures at `debug`.
//!
//! Once the inner service has consumed the request, failures without a
//! response (inner errors and panics) are returned as a rendered
//! [`ProblemDetails`] error for actix to write out.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::task::{Context, Poll};

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::FutureExt;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, error};

use crate::domain::Error;
use crate::inbound::http::error::{ProblemDetails, from_actix_error};
use crate::settings::RuntimeMode;

/// Maps failures to problem documents according to `mode`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use address_api::middleware::ErrorMapping;
/// use address_api::settings::RuntimeMode;
///
/// let app = App::new().wrap(ErrorMapping::new(RuntimeMode::Production));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ErrorMapping {
    mode: RuntimeMode,
}

impl ErrorMapping {
    #[must_use]
    pub const fn new(mode: RuntimeMode) -> Self {
        Self { mode }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ErrorMapping
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = ErrorMappingMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorMappingMiddleware {
            service,
            mode: self.mode,
        }))
    }
}

/// Service wrapper produced by [`ErrorMapping`].
pub struct ErrorMappingMiddleware<S> {
    service: S,
    mode: RuntimeMode,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_owned())
}

fn log_failure(method: &str, path: &str, error: &Error) {
    let trace_id = error.trace_id().unwrap_or_default();
    if error.code().is_fault() {
        error!(
            method,
            path,
            trace_id,
            error = error.message(),
            diagnostic = error.diagnostic().unwrap_or_default(),
            "unhandled fault while processing request"
        );
    } else {
        debug!(
            method,
            path,
            trace_id,
            code = ?error.code(),
            error = error.message(),
            "request failed"
        );
    }
}

fn problem_for(method: &str, path: &str, error: &Error, mode: RuntimeMode) -> ProblemDetails {
    log_failure(method, path, error);
    ProblemDetails::from_error(error, Some(path), mode)
}

impl<S, B> Service<ServiceRequest> for ErrorMappingMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    // The router needs sole ownership of the request while it matches, so
    // only owned copies of the method and path are kept here.
    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().to_string();
        let path = req.path().to_owned();
        let mode = self.mode;
        let fut = self.service.call(req);

        Box::pin(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(Ok(res)) => {
                    let Some(error) = res.response().error().map(from_actix_error) else {
                        return Ok(res.map_into_left_body());
                    };
                    let (request, _) = res.into_parts();
                    let response = problem_for(&method, &path, &error, mode).into_response();
                    Ok(ServiceResponse::new(request, response).map_into_right_body())
                }
                Ok(Err(err)) => {
                    let error = from_actix_error(&err);
                    Err(problem_for(&method, &path, &error, mode).into())
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    let error = Error::internal(format!("request handler panicked: {message}"))
                        .with_diagnostic(format!("panic: {message}"));
                    Err(problem_for(&method, &path, &error, mode).into())
                }
            }
        })
    }
}
