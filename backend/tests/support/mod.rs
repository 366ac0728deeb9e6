//! Shared helpers for integration tests that need embedded PostgreSQL.

pub mod cluster_skip;
pub mod pg_embed;

pub use cluster_skip::handle_cluster_setup_failure;
pub use pg_embed::{fresh_database_url, test_cluster};
