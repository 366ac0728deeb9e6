//! Address domain service.
//!
//! Implements [`AddressService`] on top of any [`AddressRepository`]. Field
//! rules belong to the input validator; this service only repeats the
//! street/city presence checks before touching storage.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    AddressPayload, AddressRepository, AddressResult, AddressService, AddressServiceError,
    CreateAddressRequest, UpdateAddressRequest,
};
use crate::domain::{Address, AddressDetails, AddressId};

/// Address service implementing the driving port.
#[derive(Clone)]
pub struct AddressServiceImpl<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> AddressServiceImpl<R> {
    /// Create a new service over `repository`, stamping times from `clock`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

fn ensure_required_fields(details: &AddressDetails) -> AddressResult<()> {
    if details.street.trim().is_empty() {
        return Err(AddressServiceError::rejected("Street is required."));
    }
    if details.city.trim().is_empty() {
        return Err(AddressServiceError::rejected("City is required."));
    }
    Ok(())
}

#[async_trait]
impl<R> AddressService for AddressServiceImpl<R>
where
    R: AddressRepository,
{
    async fn list(&self) -> AddressResult<Vec<AddressPayload>> {
        let addresses = self.repository.list_all().await?;
        Ok(addresses.into_iter().map(AddressPayload::from).collect())
    }

    async fn get_by_id(&self, id: AddressId) -> AddressResult<AddressPayload> {
        self.repository
            .find_by_id(id)
            .await?
            .map(AddressPayload::from)
            .ok_or_else(|| AddressServiceError::not_found(id))
    }

    async fn create(&self, request: CreateAddressRequest) -> AddressResult<AddressPayload> {
        ensure_required_fields(&request.details)?;

        let address = Address::create(request.details, self.clock.utc());
        let stored = self.repository.create(&address).await?;
        debug!(address_id = %stored.id, "address created");
        Ok(stored.into())
    }

    async fn update(&self, request: UpdateAddressRequest) -> AddressResult<AddressPayload> {
        let UpdateAddressRequest { id, details } = request;
        let Some(mut address) = self.repository.find_by_id(id).await? else {
            return Err(AddressServiceError::not_found(id));
        };
        ensure_required_fields(&details)?;

        address.revise(details, self.clock.utc());
        match self.repository.update(&address).await? {
            Some(stored) => Ok(stored.into()),
            None => {
                debug!(address_id = %id, "address vanished before update");
                Err(AddressServiceError::UpdateFailed)
            }
        }
    }

    async fn delete(&self, id: AddressId) -> AddressResult<()> {
        if !self.repository.exists(id).await? {
            return Err(AddressServiceError::not_found(id));
        }
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            debug!(address_id = %id, "address vanished before delete");
            Err(AddressServiceError::DeleteFailed)
        }
    }
}

#[cfg(test)]
#[path = "address_service_tests.rs"]
mod tests;
