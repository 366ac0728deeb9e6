//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error HTTP-agnostic while turning every failure
//! into one problem document shape:
//! `{title, status, detail, traceId, instance, stackTrace?, errors?}`.
//!
//! `ResponseError` renders the production form without `instance`; the
//! [`crate::middleware::ErrorMapping`] middleware re-renders it with the
//! request path and the configured runtime mode.

use actix_web::http::StatusCode;
use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER, TraceId};
use crate::settings::RuntimeMode;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Media type of problem documents.
pub const PROBLEM_JSON: &str = "application/problem+json";

const GENERIC_FAULT_DETAIL: &str = "An error occurred while processing your request.";
const UNAUTHORIZED_DETAIL: &str = "You are not authorized to access this resource.";

/// Status code for each error category.
#[must_use]
pub const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

const fn title_for(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::InvalidRequest => "Bad Request",
        ErrorCode::Unauthorized => "Unauthorized",
        ErrorCode::NotFound => "Not Found",
        ErrorCode::InternalError => "Internal Server Error",
    }
}

/// Problem document returned for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    #[schema(example = "Not Found")]
    pub title: String,
    #[schema(example = 404)]
    pub status: u16,
    #[schema(example = "Address with ID 6f1c1fd0-5b0e-4f4c-9a43-0c8f3d6e2b11 not found.")]
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Request path that produced the failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "/api/addresses/6f1c1fd0-5b0e-4f4c-9a43-0c8f3d6e2b11")]
    pub instance: Option<String>,
    /// Fault rendering; development mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
    /// Validation messages keyed by field name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<Value>,
}

impl ProblemDetails {
    /// Render `error` for a client.
    ///
    /// Faults keep their message and diagnostic in development mode only.
    #[must_use]
    pub fn from_error(error: &Error, instance: Option<&str>, mode: RuntimeMode) -> Self {
        let code = error.code();
        let reveal = mode.is_development();
        let detail = match code {
            ErrorCode::Unauthorized => UNAUTHORIZED_DETAIL.to_owned(),
            code if code.is_fault() && !reveal => GENERIC_FAULT_DETAIL.to_owned(),
            _ => error.message().to_owned(),
        };
        let stack_trace = if code.is_fault() && reveal {
            error.diagnostic().map(str::to_owned)
        } else {
            None
        };

        Self {
            title: title_for(code).to_owned(),
            status: status_for(code).as_u16(),
            detail,
            trace_id: error
                .trace_id()
                .map(str::to_owned)
                .or_else(|| TraceId::current().map(|id| id.to_string())),
            instance: instance.map(str::to_owned),
            stack_trace,
            errors: error
                .details()
                .and_then(|details| details.get("errors"))
                .cloned(),
        }
    }

    /// Build the HTTP response carrying this document.
    #[must_use]
    pub fn into_response(self) -> HttpResponse {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut builder = HttpResponse::build(status);
        builder.insert_header((header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON)));
        if let Some(id) = self.trace_id.as_deref() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.body(serde_json::to_string(&self).unwrap_or_default())
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.title, self.status, self.detail)
    }
}

/// A document already rendered for a request; written out as-is.
impl ResponseError for ProblemDetails {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        self.clone().into_response()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        ProblemDetails::from_error(self, None, RuntimeMode::Production).into_response()
    }
}

/// Promote a framework error (bad JSON, unmatched path) to a domain error.
///
/// Client errors keep their status category and message; everything else is
/// a fault carrying the framework's rendering as its diagnostic.
#[must_use]
pub fn from_actix_error(error: &actix_web::Error) -> Error {
    if let Some(domain) = error.as_error::<Error>() {
        return domain.clone();
    }
    let status = error.as_response_error().status_code();
    match status {
        StatusCode::NOT_FOUND => Error::not_found(error.to_string()),
        StatusCode::UNAUTHORIZED => Error::unauthorized(error.to_string()),
        status if status.is_client_error() => Error::invalid_request(error.to_string()),
        _ => Error::internal(error.to_string()).with_diagnostic(format!("{error:?}")),
    }
}

/// Fallback for requests no route matches.
pub async fn unmatched_route(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found(format!(
        "No resource matches {} {}.",
        req.method(),
        req.path()
    )))
}
