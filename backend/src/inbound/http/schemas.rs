//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their shape and are registered under the domain
//! type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ports::AddressPayload`].
///
/// An address as returned to clients; timestamps are not exposed.
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::AddressPayload, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AddressPayloadSchema {
    /// Server-assigned identifier.
    #[schema(value_type = String, format = Uuid, example = "6f1c1fd0-5b0e-4f4c-9a43-0c8f3d6e2b11")]
    id: String,
    #[schema(example = "1 Main St")]
    street: String,
    #[schema(example = "Troy")]
    city: String,
    #[schema(example = "NY")]
    state: String,
    /// US ZIP or ZIP+4.
    #[schema(example = "12180")]
    zip_code: String,
    #[schema(example = "USA")]
    country: String,
}
