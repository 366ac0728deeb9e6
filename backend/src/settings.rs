//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `ADDRESS_API_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence. The defaults layer
//! always supplies a bind address, environment and pool size, so a bare start
//! with no flags, variables or files still loads.

use std::net::SocketAddr;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ENVIRONMENT: &str = "production";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Deployment mode controlling Swagger UI and error verbosity.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RuntimeMode {
    /// Swagger UI is mounted and 500 responses carry the raw message plus a
    /// diagnostic `stackTrace`.
    Development,
    /// Fault details stay in the logs.
    #[default]
    Production,
}

impl RuntimeMode {
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for RuntimeMode {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(SettingsError::InvalidEnvironment {
                value: value.to_owned(),
            }),
        }
    }
}

/// Origins allowed to make cross-origin requests.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum CorsOrigins {
    /// Any origin, method and header.
    #[default]
    Any,
    /// Only the listed origins.
    Listed(Vec<String>),
}

impl CorsOrigins {
    /// Parse a comma-separated origin list; `*` or an empty list allows any.
    #[must_use]
    pub fn from_list(value: &str) -> Self {
        let origins: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();
        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            return Self::Any;
        }
        Self::Listed(origins)
    }
}

/// Errors raised while resolving settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("invalid environment '{value}'; expected development|production")]
    InvalidEnvironment { value: String },
}

/// Settings for the HTTP server and its storage.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ADDRESS_API")]
pub struct ServerSettings {
    /// Socket address to listen on.
    #[ortho_config(default = String::from(DEFAULT_BIND_ADDR))]
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; without it addresses are kept in memory.
    pub database_url: Option<String>,
    /// `development` or `production`.
    #[ortho_config(default = String::from(DEFAULT_ENVIRONMENT))]
    pub environment: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = DEFAULT_POOL_MAX_SIZE)]
    pub pool_max_size: Option<u32>,
    /// Comma-separated CORS origins; `*` allows any.
    pub cors_allowed_origins: Option<String>,
}

impl ServerSettings {
    /// Resolve the listening address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not
    /// parse as a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Resolve the runtime mode, defaulting to production.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidEnvironment`] for unknown values.
    pub fn runtime_mode(&self) -> Result<RuntimeMode, SettingsError> {
        self.environment
            .as_deref()
            .map_or(Ok(RuntimeMode::default()), RuntimeMode::from_str)
    }

    /// Database URL, ignoring blank values.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    #[must_use]
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Resolve the CORS policy, allowing any origin when unset.
    #[must_use]
    pub fn cors_origins(&self) -> CorsOrigins {
        self.cors_allowed_origins
            .as_deref()
            .map_or(CorsOrigins::Any, CorsOrigins::from_list)
    }
}
