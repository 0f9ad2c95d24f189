//! Organization operations
//!
//! Organizations are addressed by name. Every method is a single request;
//! nothing is cached between calls.

use std::sync::Arc;

use tfe_common::validation::Validator;
use tfe_domain::{
    sort_by_name, CollectionDocument, CreateOrganizationInput, Document,
    ModifyOrganizationInput, NotFoundPolicy, Organization, SingleDocument,
};
use tracing::{debug, instrument, warn};
use urlencoding::encode;

use super::client::ApiClient;
use super::errors::ApiError;

const ORGANIZATIONS_PATH: &str = "organizations";

/// Organization endpoints
#[derive(Clone)]
pub struct Organizations {
    client: Arc<ApiClient>,
}

impl Organizations {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List every organization visible to the token, in server order.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or a resource has the wrong type
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Organization>, ApiError> {
        let document: CollectionDocument<Organization> =
            self.client.get(ORGANIZATIONS_PATH).await?;
        let organizations = document.into_resources()?;

        debug!(count = organizations.len(), "Organizations listed");
        Ok(organizations)
    }

    /// Like [`list`](Self::list), ordered by name.
    ///
    /// # Errors
    ///
    /// Same as [`list`](Self::list)
    pub async fn list_sorted(&self) -> Result<Vec<Organization>, ApiError> {
        let mut organizations = self.list().await?;
        sort_by_name(&mut organizations);
        Ok(organizations)
    }

    /// Fetch a single organization.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for an empty or dots-only name and
    /// `ApiError::NotFound` if no such organization exists
    #[instrument(skip(self), fields(organization = %name))]
    pub async fn get(&self, name: &str) -> Result<Organization, ApiError> {
        let path = organization_path(name)?;
        let document: SingleDocument<Organization> = self.client.get(&path).await?;
        Ok(document.into_resource()?)
    }

    /// Create an organization.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` without sending anything when the name
    /// is empty; otherwise the mapped server error
    #[instrument(skip(self, input), fields(organization = %input.name))]
    pub async fn create(&self, input: &CreateOrganizationInput) -> Result<Organization, ApiError> {
        input.validate()?;

        let payload = input.to_payload();
        let document: SingleDocument<Organization> =
            self.client.post(ORGANIZATIONS_PATH, &Document::wrap(&payload)).await?;
        let organization = document.into_resource()?;

        debug!(organization = %organization.name, "Organization created");
        Ok(organization)
    }

    /// Update the given fields of an existing organization.
    ///
    /// Fields left unset are not sent and keep their current value.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` without sending anything when the name
    /// (or a requested rename) is empty; otherwise the mapped server error
    #[instrument(skip(self, input), fields(organization = %input.name))]
    pub async fn modify(&self, input: &ModifyOrganizationInput) -> Result<Organization, ApiError> {
        input.validate()?;

        let path = organization_path(&input.name)?;
        let payload = input.to_payload();
        let document: SingleDocument<Organization> =
            self.client.patch(&path, &Document::wrap(&payload)).await?;
        let organization = document.into_resource()?;

        debug!(organization = %organization.name, "Organization modified");
        Ok(organization)
    }

    /// Delete an organization.
    ///
    /// A missing organization is reported or absorbed according to
    /// `ClientConfig::organization_delete`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for an empty name, `ApiError::NotFound`
    /// under [`NotFoundPolicy::Propagate`], and any other server error
    #[instrument(skip(self), fields(organization = %name))]
    pub async fn delete(&self, name: &str) -> Result<(), ApiError> {
        let path = organization_path(name)?;

        match self.client.delete(&path).await {
            Ok(()) => {
                debug!("Organization deleted");
                Ok(())
            }
            Err(err)
                if err.is_not_found()
                    && self.client.config().organization_delete == NotFoundPolicy::Ignore =>
            {
                warn!(error = %err, "Organization already absent, treating delete as done");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

fn organization_path(name: &str) -> Result<String, ApiError> {
    let mut validator = Validator::new();
    validator.validate_path_segment("name", name);
    validator.finalize()?;
    Ok(format!("{}/{}", ORGANIZATIONS_PATH, encode(name)))
}
