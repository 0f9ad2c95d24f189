//! Entry point bundling the resource clients over one shared connection

use std::sync::Arc;

use tfe_domain::ClientConfig;

use super::client::ApiClient;
use super::errors::ApiError;
use super::organizations::Organizations;
use super::registry_modules::RegistryModules;

/// Client for every supported resource
#[derive(Clone)]
pub struct TfeClient {
    client: Arc<ApiClient>,
}

impl TfeClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client: Arc::new(client) }
    }

    /// Build a client that authenticates with `config.token`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the token is empty or the address is
    /// invalid
    pub fn from_config(config: ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(ApiClient::from_config(config)?))
    }

    pub fn organizations(&self) -> Organizations {
        Organizations::new(Arc::clone(&self.client))
    }

    pub fn registry_modules(&self) -> RegistryModules {
        RegistryModules::new(Arc::clone(&self.client))
    }

    /// Underlying API client
    pub fn api(&self) -> &ApiClient {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn clients_can_be_shared_between_tasks() {
        assert_send_sync::<TfeClient>();
        assert_send_sync::<Organizations>();
        assert_send_sync::<RegistryModules>();
    }

    #[test]
    fn resource_clients_share_the_connection() {
        let tfe = TfeClient::from_config(ClientConfig::with_token("t")).unwrap();
        let _ = tfe.organizations();
        let _ = tfe.registry_modules();
        assert_eq!(Arc::strong_count(&tfe.client), 1);
        assert_eq!(tfe.api().config().token, "t");
    }
}
