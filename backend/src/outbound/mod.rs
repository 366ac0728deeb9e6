//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM.
//! - **memory**: in-process repositories for database-less runs and tests.
//!
//! Adapters translate between domain types and storage representations; they
//! contain no business logic.

pub mod memory;
pub mod persistence;
