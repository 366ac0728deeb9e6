//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod address_repository;
mod address_service;

#[cfg(test)]
pub use address_repository::MockAddressRepository;
pub use address_repository::{AddressRepository, AddressRepositoryError};
#[cfg(test)]
pub use address_service::MockAddressService;
pub use address_service::{
    AddressPayload, AddressResult, AddressService, AddressServiceError, CreateAddressRequest,
    UpdateAddressRequest,
};
