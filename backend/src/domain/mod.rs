//! Domain primitives, aggregates and services.
//!
//! Purpose: Define the address aggregate, its input rules and the use-case
//! service behind the HTTP adapter. Nothing in this module knows about HTTP
//! or SQL.
//!
//! Public surface:
//! - Address, AddressId, AddressDetails: the aggregate and its fields.
//! - AddressInput: client fields as received, before validation.
//! - AddressInputValidator, Validator: field rules for create/update input.
//! - AddressServiceImpl: the driving-port implementation.
//! - Error, ErrorCode: transport-agnostic failure payload.
//! - TraceId: request correlation identifier.

pub mod address;
pub mod address_service;
pub mod address_validation;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::address::{Address, AddressDetails, AddressId, AddressInput};
pub use self::address_service::AddressServiceImpl;
pub use self::address_validation::{
    AddressInputValidator, FieldViolation, ValidationReport, Validator,
};
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
