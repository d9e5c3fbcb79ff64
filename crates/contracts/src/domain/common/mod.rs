//! Common types shared by all aggregates and the API layer

pub mod envelope;
pub mod validation;

// Re-exports
pub use envelope::{ApiEnvelope, GENERIC_ERROR};
pub use validation::FieldErrors;
