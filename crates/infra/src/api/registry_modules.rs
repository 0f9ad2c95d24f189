//! Private registry module operations

use std::sync::Arc;

use tfe_domain::{
    Document, RegistryModule, RegistryModuleCreateOptions, RegistryModuleDeleteTarget,
    SingleDocument,
};
use tracing::{debug, instrument, warn};
use urlencoding::encode;

use super::client::ApiClient;
use super::errors::ApiError;

const REGISTRY_MODULES_PATH: &str = "registry-modules";

/// Registry module endpoints
#[derive(Clone)]
pub struct RegistryModules {
    client: Arc<ApiClient>,
}

impl RegistryModules {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Publish a module from a VCS repository into `organization`'s registry.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` without sending anything when the
    /// organization is not a valid name or the VCS reference is missing or
    /// incomplete; otherwise the mapped server error
    #[instrument(skip(self, options), fields(organization = %organization))]
    pub async fn create(
        &self,
        organization: &str,
        options: &RegistryModuleCreateOptions,
    ) -> Result<RegistryModule, ApiError> {
        options.validate(organization)?;

        let document: SingleDocument<RegistryModule> =
            self.client.post(REGISTRY_MODULES_PATH, &Document::wrap(options)).await?;
        let module = document.into_resource()?;

        debug!(
            module_id = %module.id,
            name = %module.name,
            provider = %module.provider,
            "Registry module created"
        );
        Ok(module)
    }

    /// Delete a module with all of its versions.
    ///
    /// Deleting a module that does not exist succeeds. Either way the
    /// result is `RegistryModule::default()`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if any name is empty or dots-only, and
    /// every server error other than not-found
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        organization: &str,
        module: &str,
        provider: &str,
    ) -> Result<RegistryModule, ApiError> {
        let target = RegistryModuleDeleteTarget { organization, module, provider };
        target.validate()?;

        match self.client.delete(&delete_path(&target)).await {
            Ok(()) => {
                debug!("Registry module deleted");
                Ok(RegistryModule::default())
            }
            Err(err) if err.is_not_found() => {
                warn!(error = %err, "Registry module already absent, treating delete as done");
                Ok(RegistryModule::default())
            }
            Err(err) => Err(err),
        }
    }
}

fn delete_path(target: &RegistryModuleDeleteTarget<'_>) -> String {
    format!(
        "{}/actions/delete/{}/{}/{}",
        REGISTRY_MODULES_PATH,
        encode(target.organization),
        encode(target.module),
        encode(target.provider)
    )
}
