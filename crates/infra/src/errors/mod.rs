//! Error conversions from third-party crates into domain errors.

pub mod conversions;

pub use conversions::InfraError;
