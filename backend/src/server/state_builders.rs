//! Builders wiring repositories and services into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::{info, warn};

use address_api::domain::AddressServiceImpl;
use address_api::domain::ports::{AddressRepository, AddressService};
use address_api::inbound::http::state::HttpState;
use address_api::outbound::memory::InMemoryAddressRepository;
use address_api::outbound::persistence::DieselAddressRepository;

use super::ServerConfig;

fn service_over<R>(repository: R) -> Arc<dyn AddressService>
where
    R: AddressRepository + 'static,
{
    Arc::new(AddressServiceImpl::new(
        Arc::new(repository),
        Arc::new(DefaultClock),
    ))
}

/// Build handler state, backed by PostgreSQL when a pool is configured and
/// by an in-memory map otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let addresses = match &config.db_pool {
        Some(pool) => {
            info!("address repository: postgres");
            service_over(DieselAddressRepository::new(pool.clone()))
        }
        None => {
            warn!("no database configured; addresses are kept in memory");
            service_over(InMemoryAddressRepository::new())
        }
    };
    web::Data::new(HttpState::new(addresses))
}
