//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use address_api::outbound::persistence::DbPool;
use address_api::settings::{CorsOrigins, RuntimeMode};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) mode: RuntimeMode,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) cors: CorsOrigins,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, mode: RuntimeMode) -> Self {
        Self {
            bind_addr,
            mode,
            db_pool: None,
            cors: CorsOrigins::Any,
        }
    }

    /// Attach a database connection pool.
    ///
    /// Without one the server keeps addresses in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Restrict cross-origin requests; any origin is allowed by default.
    #[must_use]
    pub fn with_cors(mut self, cors: CorsOrigins) -> Self {
        self.cors = cors;
        self
    }
}
