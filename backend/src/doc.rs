//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the address and health endpoints together with the
//! schema wrappers from [`crate::inbound::http::schemas`], so domain types
//! stay free of utoipa derives.
//!
//! The generated document backs Swagger UI (development mode) and is printed
//! by `cargo run --bin openapi-dump`.

use crate::inbound::http::addresses::AddressRequest;
use crate::inbound::http::error::ProblemDetails;
use crate::inbound::http::schemas::AddressPayloadSchema;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Address API",
        description = "CRUD interface for postal addresses with health checks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::addresses::list_addresses,
        crate::inbound::http::addresses::get_address,
        crate::inbound::http::addresses::create_address,
        crate::inbound::http::addresses::update_address,
        crate::inbound::http::addresses::delete_address,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(AddressPayloadSchema, AddressRequest, ProblemDetails)),
    tags(
        (name = "addresses", description = "Address CRUD operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
