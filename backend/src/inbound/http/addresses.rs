//! Address HTTP handlers.
//!
//! ```text
//! GET    /api/addresses
//! GET    /api/addresses/{id}
//! POST   /api/addresses
//! PUT    /api/addresses/{id}
//! DELETE /api/addresses/{id}
//! ```
//!
//! Bodies pass the input validator before the service is called. Path ids
//! that are not UUIDs do not match and surface as 404.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{AddressPayload, AddressServiceError, CreateAddressRequest, UpdateAddressRequest};
use crate::domain::{AddressDetails, AddressId, AddressInput, Error, ErrorCode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ProblemDetails;
use crate::inbound::http::schemas::AddressPayloadSchema;
use crate::inbound::http::state::HttpState;

/// Request body for creating or replacing an address.
///
/// Missing and `null` fields decode as `None` so the validator reports them
/// rather than the JSON extractor.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    #[schema(example = "1 Main St")]
    pub street: Option<String>,
    #[schema(example = "Troy")]
    pub city: Option<String>,
    #[schema(example = "NY")]
    pub state: Option<String>,
    #[schema(example = "12180")]
    pub zip_code: Option<String>,
    #[schema(example = "USA")]
    pub country: Option<String>,
}

impl From<AddressRequest> for AddressInput {
    fn from(value: AddressRequest) -> Self {
        Self {
            street: value.street,
            city: value.city,
            state: value.state,
            zip_code: value.zip_code,
            country: value.country,
        }
    }
}

/// Location of a created address.
#[must_use]
pub fn address_location(id: Uuid) -> String {
    format!("/api/addresses/{id}")
}

fn validate(state: &HttpState, payload: AddressRequest) -> ApiResult<AddressDetails> {
    let input = AddressInput::from(payload);
    let report = state.validator.validate(&input);
    if report.is_valid() {
        return Ok(AddressDetails::from(input));
    }
    Err(
        Error::invalid_request("One or more validation errors occurred.")
            .with_details(json!({ "errors": report.to_error_map() })),
    )
}

/// Map a service failure to the status category of the calling operation.
///
/// Storage faults always become internal errors for the error-mapping
/// middleware to log and redact.
fn map_service_error(error: AddressServiceError, failure: ErrorCode) -> Error {
    if error.is_fault() {
        let diagnostic = format!("{error:?}");
        return Error::internal(error.to_string()).with_diagnostic(diagnostic);
    }
    Error::new(failure, error.to_string())
}

/// List every address.
#[utoipa::path(
    get,
    path = "/api/addresses",
    responses(
        (status = 200, description = "All addresses", body = [AddressPayloadSchema]),
        (status = 400, description = "Listing failed", body = ProblemDetails),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    ),
    tags = ["addresses"],
    operation_id = "listAddresses"
)]
#[get("/addresses")]
pub async fn list_addresses(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<AddressPayload>>> {
    let addresses = state
        .addresses
        .list()
        .await
        .map_err(|err| map_service_error(err, ErrorCode::InvalidRequest))?;
    Ok(web::Json(addresses))
}

/// Fetch one address.
#[utoipa::path(
    get,
    path = "/api/addresses/{id}",
    params(("id" = Uuid, Path, description = "Address identifier")),
    responses(
        (status = 200, description = "The address", body = AddressPayloadSchema),
        (status = 404, description = "No such address", body = ProblemDetails),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    ),
    tags = ["addresses"],
    operation_id = "getAddress"
)]
#[get("/addresses/{id}")]
pub async fn get_address(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<AddressPayload>> {
    let id = AddressId::from(path.into_inner());
    let address = state
        .addresses
        .get_by_id(id)
        .await
        .map_err(|err| map_service_error(err, ErrorCode::NotFound))?;
    Ok(web::Json(address))
}

/// Create an address.
#[utoipa::path(
    post,
    path = "/api/addresses",
    request_body = AddressRequest,
    responses(
        (
            status = 201,
            description = "Created",
            headers(("Location" = String, description = "URL of the new address")),
            body = AddressPayloadSchema
        ),
        (status = 400, description = "Invalid address", body = ProblemDetails),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    ),
    tags = ["addresses"],
    operation_id = "createAddress"
)]
#[post("/addresses")]
pub async fn create_address(
    state: web::Data<HttpState>,
    payload: web::Json<AddressRequest>,
) -> ApiResult<HttpResponse> {
    let details = validate(&state, payload.into_inner())?;

    let created = state
        .addresses
        .create(CreateAddressRequest { details })
        .await
        .map_err(|err| map_service_error(err, ErrorCode::InvalidRequest))?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, address_location(created.id)))
        .json(created))
}

/// Replace every field of an address.
#[utoipa::path(
    put,
    path = "/api/addresses/{id}",
    params(("id" = Uuid, Path, description = "Address identifier")),
    request_body = AddressRequest,
    responses(
        (status = 200, description = "Updated address", body = AddressPayloadSchema),
        (status = 400, description = "Invalid address", body = ProblemDetails),
        (status = 404, description = "No such address", body = ProblemDetails),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    ),
    tags = ["addresses"],
    operation_id = "updateAddress"
)]
#[put("/addresses/{id}")]
pub async fn update_address(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<AddressRequest>,
) -> ApiResult<web::Json<AddressPayload>> {
    let details = validate(&state, payload.into_inner())?;

    let id = AddressId::from(path.into_inner());
    let updated = state
        .addresses
        .update(UpdateAddressRequest { id, details })
        .await
        .map_err(|err| map_service_error(err, ErrorCode::NotFound))?;
    Ok(web::Json(updated))
}

/// Delete an address.
#[utoipa::path(
    delete,
    path = "/api/addresses/{id}",
    params(("id" = Uuid, Path, description = "Address identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such address", body = ProblemDetails),
        (status = 500, description = "Internal server error", body = ProblemDetails)
    ),
    tags = ["addresses"],
    operation_id = "deleteAddress"
)]
#[delete("/addresses/{id}")]
pub async fn delete_address(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = AddressId::from(path.into_inner());
    state
        .addresses
        .delete(id)
        .await
        .map_err(|err| map_service_error(err, ErrorCode::NotFound))?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the address endpoints on a `/api` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_addresses)
        .service(get_address)
        .service(create_address)
        .service(update_address)
        .service(delete_address);
}

#[cfg(test)]
#[path = "addresses_tests.rs"]
mod tests;
