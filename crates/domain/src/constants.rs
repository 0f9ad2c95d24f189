//! Wire-level constants
//!
//! Centralized location for the endpoint defaults and JSON-API names used
//! throughout the client.

// Endpoint defaults
pub const DEFAULT_ADDRESS: &str = "https://app.terraform.io";
pub const DEFAULT_BASE_PATH: &str = "/api/v2/";
pub const JSONAPI_MEDIA_TYPE: &str = "application/vnd.api+json";

// Resource type names
pub const ORGANIZATIONS_TYPE: &str = "organizations";
pub const REGISTRY_MODULES_TYPE: &str = "registry-modules";

// Relationship names
pub const ORGANIZATION_RELATIONSHIP: &str = "organization";
