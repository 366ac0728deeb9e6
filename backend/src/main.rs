//! Address API entry-point: loads settings, prepares storage and serves HTTP.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use address_api::inbound::http::health::HealthState;
use address_api::outbound::persistence::{DbPool, PoolConfig, run_migrations_blocking};
use address_api::settings::ServerSettings;

use server::{ServerConfig, create_server, drain_on_shutdown};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

async fn connect(database_url: &str, max_size: u32) -> io::Result<DbPool> {
    run_migrations_blocking(database_url.to_owned())
        .await
        .map_err(|e| io::Error::other(format!("database migration failed: {e}")))?;
    DbPool::new(PoolConfig::new(database_url).with_max_size(max_size))
        .await
        .map_err(|e| io::Error::other(format!("database pool setup failed: {e}")))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();

    let settings = ServerSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let mode = settings.runtime_mode().map_err(io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr, mode).with_cors(settings.cors_origins());
    if let Some(url) = settings.database_url() {
        config = config.with_db_pool(connect(url, settings.pool_max_size()).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on_shutdown(health_state, server.handle()));
    info!(%bind_addr, ?mode, "address API listening");
    server.await
}
