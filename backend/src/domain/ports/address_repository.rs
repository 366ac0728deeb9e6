//! Port for address persistence.
//!
//! Adapters store whole [`Address`] rows keyed by [`AddressId`]. The port
//! reports absence through `Option`/`bool` results rather than errors so the
//! service can turn it into a business failure.

use async_trait::async_trait;

use crate::domain::{Address, AddressId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by address repository adapters.
    pub enum AddressRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "address repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "address repository query failed: {message}",
    }
}

/// Port for address storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Return every stored address, in no particular order.
    async fn list_all(&self) -> Result<Vec<Address>, AddressRepositoryError>;

    /// Fetch an address by identifier.
    async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, AddressRepositoryError>;

    /// Insert a new address and return the stored row.
    async fn create(&self, address: &Address) -> Result<Address, AddressRepositoryError>;

    /// Overwrite an existing address.
    ///
    /// Returns `None` when no row with `address.id` exists at the time of the
    /// write, which happens when a concurrent delete wins the race.
    async fn update(&self, address: &Address) -> Result<Option<Address>, AddressRepositoryError>;

    /// Remove an address. Returns `false` when nothing was deleted.
    async fn delete(&self, id: AddressId) -> Result<bool, AddressRepositoryError>;

    /// Report whether an address with this identifier is stored.
    async fn exists(&self, id: AddressId) -> Result<bool, AddressRepositoryError>;
}
