//! Driving port for address use-cases.
//!
//! HTTP handlers call [`AddressService`] after the input validator has
//! accepted the request body. Every operation returns an [`AddressResult`]:
//! business failures and storage faults are distinct variants of
//! [`AddressServiceError`] so adapters can log and surface them differently.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Address, AddressDetails, AddressId};

use super::AddressRepositoryError;

/// Outcome of an address use-case.
pub type AddressResult<T> = Result<T, AddressServiceError>;

/// Failures reported by [`AddressService`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressServiceError {
    /// No address is stored under the requested identifier.
    #[error("Address with ID {id} not found.")]
    NotFound { id: AddressId },
    /// A business rule rejected the input.
    #[error("{message}")]
    Rejected { message: String },
    /// The row disappeared between the existence check and the write.
    #[error("Failed to update address.")]
    UpdateFailed,
    /// The row disappeared between the existence check and the delete.
    #[error("Failed to delete address.")]
    DeleteFailed,
    /// Storage failed; this is a fault, not a business outcome.
    #[error(transparent)]
    Repository(#[from] AddressRepositoryError),
}

impl AddressServiceError {
    pub fn not_found(id: AddressId) -> Self {
        Self::NotFound { id }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// `true` for storage faults that must reach the error-mapping middleware
    /// instead of a 4xx response.
    #[must_use]
    pub const fn is_fault(&self) -> bool {
        matches!(self, Self::Repository(_))
    }
}

/// Request to create an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAddressRequest {
    pub details: AddressDetails,
}

/// Request to replace every field of an existing address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAddressRequest {
    pub id: AddressId,
    pub details: AddressDetails,
}

/// Address representation returned to clients; timestamps stay internal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPayload {
    pub id: Uuid,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl From<Address> for AddressPayload {
    fn from(value: Address) -> Self {
        let Address { id, details, .. } = value;
        let AddressDetails {
            street,
            city,
            state,
            zip_code,
            country,
        } = details;
        Self {
            id: id.into(),
            street,
            city,
            state,
            zip_code,
            country,
        }
    }
}

/// Driving port for address operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressService: Send + Sync {
    /// List every address. An empty store is a success.
    async fn list(&self) -> AddressResult<Vec<AddressPayload>>;

    /// Fetch one address.
    async fn get_by_id(&self, id: AddressId) -> AddressResult<AddressPayload>;

    /// Create an address with a freshly generated identifier.
    async fn create(&self, request: CreateAddressRequest) -> AddressResult<AddressPayload>;

    /// Replace every descriptive field of an existing address.
    async fn update(&self, request: UpdateAddressRequest) -> AddressResult<AddressPayload>;

    /// Delete an address.
    async fn delete(&self, id: AddressId) -> AddressResult<()>;
}
