//! Registry module types
//!
//! A registry module is bound to its source through a VCS repository
//! reference: an OAuth token id paired with the repository identifier.

use serde::{Deserialize, Serialize};
use tfe_common::validation::{IdentifierValidator, ValidationResult, Validator};

use crate::constants::{ORGANIZATION_RELATIONSHIP, REGISTRY_MODULES_TYPE};
use crate::jsonapi::{JsonApiResource, ResourceIdentifier};

/// VCS repository a module is published from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VcsRepo {
    #[serde(default)]
    pub oauth_token_id: String,
    /// Repository identifier on the VCS host, e.g. `hashicorp/terraform-aws-consul`
    #[serde(default)]
    pub identifier: String,
}

/// What the current token may do with a module
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegistryModulePermissions {
    #[serde(default)]
    pub can_delete: bool,
    #[serde(default)]
    pub can_resync: bool,
    #[serde(default)]
    pub can_retry: bool,
}

/// A module in the private registry
///
/// `RegistryModule::default()` is the empty result returned by deletes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegistryModule {
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcs_repo: Option<VcsRepo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<RegistryModulePermissions>,
    /// Name of the owning organization, from the `organization` relationship
    #[serde(skip)]
    pub organization: Option<String>,
}

impl JsonApiResource for RegistryModule {
    const TYPE_NAME: &'static str = REGISTRY_MODULES_TYPE;

    fn resource_id(&self) -> Option<&str> {
        (!self.id.is_empty()).then_some(self.id.as_str())
    }

    fn set_resource_id(&mut self, id: String) {
        self.id = id;
    }

    fn set_relationship(&mut self, name: &str, target: ResourceIdentifier) {
        if name == ORGANIZATION_RELATIONSHIP {
            self.organization = Some(target.id);
        }
    }
}

/// VCS reference as supplied by the caller; both fields are required
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct VcsRepoOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_token_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl VcsRepoOptions {
    pub fn new(oauth_token_id: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self { oauth_token_id: Some(oauth_token_id.into()), identifier: Some(identifier.into()) }
    }
}

/// Options for publishing a module from a VCS repository.
///
/// The body never carries a primary id; the server assigns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegistryModuleCreateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs_repo: Option<VcsRepoOptions>,
}

impl RegistryModuleCreateOptions {
    pub fn new(vcs_repo: VcsRepoOptions) -> Self {
        Self { vcs_repo: Some(vcs_repo) }
    }

    /// Check the owning organization and the VCS reference
    ///
    /// # Errors
    /// Returns a `ValidationError` if the organization is not a valid
    /// identifier, the VCS reference is missing, or either of its fields is
    /// empty.
    pub fn validate(&self, organization: &str) -> ValidationResult<()> {
        let mut validator = Validator::new();
        validator.validate_field("organization", organization, &IdentifierValidator);
        if let Some(repo) = validator.validate_present("vcs_repo", &self.vcs_repo) {
            validator.validate_nested("vcs_repo", |v| {
                let token = repo.oauth_token_id.as_deref().unwrap_or("");
                v.validate_not_empty("oauth_token_id", token);
                v.validate_not_empty("identifier", repo.identifier.as_deref().unwrap_or(""));
            });
        }
        validator.finalize()
    }
}

impl JsonApiResource for RegistryModuleCreateOptions {
    const TYPE_NAME: &'static str = REGISTRY_MODULES_TYPE;

    fn resource_id(&self) -> Option<&str> {
        None
    }
}

/// The three names that address a module for deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryModuleDeleteTarget<'a> {
    pub organization: &'a str,
    pub module: &'a str,
    pub provider: &'a str,
}

impl RegistryModuleDeleteTarget<'_> {
    /// # Errors
    /// Returns a `ValidationError` naming each empty or dots-only segment.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut validator = Validator::new();
        validator.validate_path_segment("organization", self.organization);
        validator.validate_path_segment("module", self.module);
        validator.validate_path_segment("provider", self.provider);
        validator.finalize()
    }
}
