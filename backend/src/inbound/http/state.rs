//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::AddressService;
use crate::domain::{AddressInput, AddressInputValidator, Validator};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub addresses: Arc<dyn AddressService>,
    pub validator: Arc<dyn Validator<AddressInput>>,
}

impl HttpState {
    /// Construct state around an address service using the standard input
    /// rules.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use address_api::domain::AddressServiceImpl;
    /// use address_api::inbound::http::state::HttpState;
    /// use address_api::outbound::memory::InMemoryAddressRepository;
    /// use mockable::DefaultClock;
    ///
    /// let service = AddressServiceImpl::new(
    ///     Arc::new(InMemoryAddressRepository::new()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let state = HttpState::new(Arc::new(service));
    /// let _addresses = state.addresses.clone();
    /// ```
    pub fn new(addresses: Arc<dyn AddressService>) -> Self {
        Self {
            addresses,
            validator: Arc::new(AddressInputValidator),
        }
    }
}
