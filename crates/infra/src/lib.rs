//! # TFE Infrastructure
//!
//! Network-facing implementation of the TFE client.
//!
//! This crate contains:
//! - HTTP transport ([`http::HttpClient`])
//! - The JSON-API client and resource clients ([`api`])
//! - Configuration loading from environment and files ([`config`])
//! - Conversions from third-party errors into domain errors
//!
//! ## Architecture
//! - Uses the types and envelope defined in `tfe-domain`
//! - Contains all "impure" code (network, environment, filesystem)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{
    AccessTokenProvider, ApiClient, ApiClientBuilder, ApiError, ApiErrorCategory, Organizations,
    RegistryModules, StaticTokenProvider, TfeClient,
};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
