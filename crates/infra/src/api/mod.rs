//! TFE API client
//!
//! This module provides the HTTP-based client for the JSON-API endpoints:
//! authentication, request/response handling, and one typed client per
//! resource.
//!
//! # Architecture
//!
//! - Uses [`crate::http::HttpClient`] for transport (no direct reqwest)
//! - Bearer token from an [`AccessTokenProvider`]
//! - Input validation happens before any request is built
//! - Idempotent deletes absorb not-found responses

pub mod auth;
pub mod client;
pub mod errors;
pub mod organizations;
pub mod registry_modules;
pub mod tfe;

pub use auth::{AccessTokenProvider, StaticTokenProvider};
pub use client::{ApiClient, ApiClientBuilder};
pub use errors::{ApiError, ApiErrorCategory};
pub use organizations::Organizations;
pub use registry_modules::RegistryModules;
pub use tfe::TfeClient;
