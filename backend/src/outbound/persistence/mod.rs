//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of domain repository ports backed by PostgreSQL
//! through `diesel-async` and a `bb8` pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: pool and Diesel failures map onto the port's error enum.
//!
//! # Example
//!
//! ```ignore
//! use address_api::outbound::persistence::{DbPool, DieselAddressRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/addresses")).await?;
//! let repo = DieselAddressRepository::new(pool);
//! ```

mod diesel_address_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_address_repository::DieselAddressRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations, run_migrations_blocking};
pub use pool::{DbPool, PoolConfig, PoolError};
