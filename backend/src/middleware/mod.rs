//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every endpoint. Wrap order,
//! outermost first: [`Trace`], [`RequestLogging`], [`ErrorMapping`].

pub mod error_mapping;
pub mod request_log;
pub mod trace;

pub use error_mapping::ErrorMapping;
pub use request_log::RequestLogging;
pub use trace::Trace;
