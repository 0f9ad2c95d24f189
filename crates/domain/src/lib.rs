//! # TFE Domain
//!
//! Resource types and wire contracts for the TFE client.
//!
//! This crate contains:
//! - Resource types (Organization, RegistryModule, VcsRepo)
//! - Request inputs and their local validation
//! - The JSON-API envelope and the [`JsonApiResource`] trait
//! - Domain error types and Result definitions
//! - Client configuration structures
//!
//! ## Architecture
//! - Depends only on `tfe-common` (validation) and external crates
//! - No I/O: nothing here talks to the network or the filesystem

pub mod config;
pub mod constants;
pub mod errors;
pub mod jsonapi;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use jsonapi::{
    CollectionDocument, Document, JsonApiResource, Relationship, RelationshipData,
    ResourceIdentifier, ResourceObject, SingleDocument,
};
pub use types::*;
