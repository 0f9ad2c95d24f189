//! HTTP transport
//!
//! Thin wrapper over reqwest that the API client sends every request
//! through. Callers that need timeouts or transport-level retries configure
//! them here; the API client adds neither.

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
