//! Organization types
//!
//! An organization is addressed by its name, which doubles as its JSON-API
//! primary id. The name only changes through
//! [`ModifyOrganizationInput::rename`].

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tfe_common::validation::{ValidationResult, Validator};

use crate::constants::ORGANIZATIONS_TYPE;
use crate::jsonapi::JsonApiResource;

/// A TFE organization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Organization {
    /// Globally unique within a TFE instance
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// May be absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// 2FA or other authentication required of collaborators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborator_auth_policy: Option<String>,
    /// "trial", "pro" or "premium"; always "premium" on private installs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enterprise_plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Only meaningful on the "trial" plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_expires_at: Option<DateTime<Utc>>,
    /// Installation-wide setting, exposed per organization
    #[serde(default)]
    pub saml_enabled: bool,
    /// SAML role mapped to the owners team; `None` disables owner access via SAML
    #[serde(
        default,
        rename = "owners-team-saml-role-id",
        skip_serializing_if = "Option::is_none"
    )]
    pub saml_owners_role: Option<String>,
}

impl Organization {
    /// Lexicographic ordering by name, for presentation
    pub fn cmp_by_name(a: &Self, b: &Self) -> Ordering {
        a.name.cmp(&b.name)
    }
}

impl JsonApiResource for Organization {
    const TYPE_NAME: &'static str = ORGANIZATIONS_TYPE;

    fn resource_id(&self) -> Option<&str> {
        (!self.name.is_empty()).then_some(self.name.as_str())
    }

    fn set_resource_id(&mut self, id: String) {
        if self.name.is_empty() {
            self.name = id;
        }
    }
}

/// Sort organizations by name in place
pub fn sort_by_name(organizations: &mut [Organization]) {
    organizations.sort_by(Organization::cmp_by_name);
}

/// Attributes sent when creating or modifying an organization.
///
/// Unset fields are omitted from the body, so the server leaves them as
/// they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrganizationPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "owners-team-saml-role-id", skip_serializing_if = "Option::is_none")]
    pub saml_owners_role: Option<String>,
}

impl JsonApiResource for OrganizationPayload {
    const TYPE_NAME: &'static str = ORGANIZATIONS_TYPE;

    fn resource_id(&self) -> Option<&str> {
        None
    }
}

/// Parameters for creating an organization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOrganizationInput {
    /// Required
    pub name: String,
    pub email: Option<String>,
    /// Without it the owners team cannot be reached through SAML
    pub saml_owners_role: Option<String>,
}

impl CreateOrganizationInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn saml_owners_role(mut self, role: impl Into<String>) -> Self {
        self.saml_owners_role = Some(role.into());
        self
    }

    /// Check required fields before any request is built
    ///
    /// # Errors
    /// Returns a `ValidationError` naming each missing field, or a name that
    /// could not be used as a path segment.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut validator = Validator::new();
        validator.validate_path_segment("name", &self.name);
        validator.finalize()
    }

    pub fn to_payload(&self) -> OrganizationPayload {
        OrganizationPayload {
            name: Some(self.name.clone()),
            email: self.email.clone(),
            saml_owners_role: self.saml_owners_role.clone(),
        }
    }
}

/// Parameters for modifying an existing organization.
///
/// Optional values left as `None` are left intact on the organization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifyOrganizationInput {
    /// The organization to modify. Required.
    pub name: String,
    /// New name for the organization
    pub rename: Option<String>,
    pub email: Option<String>,
    pub saml_owners_role: Option<String>,
}

impl ModifyOrganizationInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn rename(mut self, new_name: impl Into<String>) -> Self {
        self.rename = Some(new_name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn saml_owners_role(mut self, role: impl Into<String>) -> Self {
        self.saml_owners_role = Some(role.into());
        self
    }

    /// # Errors
    /// Returns a `ValidationError` if `name` is empty or `rename` is set but
    /// empty.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut validator = Validator::new();
        validator.validate_path_segment("name", &self.name);
        if let Some(rename) = &self.rename {
            validator.validate_path_segment("rename", rename);
        }
        validator.finalize()
    }

    /// The rename travels as the `name` attribute.
    pub fn to_payload(&self) -> OrganizationPayload {
        OrganizationPayload {
            name: self.rename.clone(),
            email: self.email.clone(),
            saml_owners_role: self.saml_owners_role.clone(),
        }
    }
}
