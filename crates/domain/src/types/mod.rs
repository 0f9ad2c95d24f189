//! Resource types, request inputs and their validation

pub mod organization;
pub mod registry_module;

pub use organization::{
    sort_by_name, CreateOrganizationInput, ModifyOrganizationInput, Organization,
    OrganizationPayload,
};
pub use registry_module::{
    RegistryModule, RegistryModuleCreateOptions, RegistryModuleDeleteTarget,
    RegistryModulePermissions, VcsRepo, VcsRepoOptions,
};
