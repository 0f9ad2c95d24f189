//! Client configuration structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ADDRESS, DEFAULT_BASE_PATH};

/// What a delete does when the server reports the target as missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotFoundPolicy {
    /// Return the not-found error to the caller
    #[default]
    Propagate,
    /// Treat the missing resource as already deleted
    Ignore,
}

crate::impl_setting_conversions!(NotFoundPolicy {
    Propagate => "propagate",
    Ignore => "ignore",
});

/// Connection settings for the API client
///
/// Every field has a default, so a file only needs to name what it changes.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme and host of the service, e.g. `https://app.terraform.io`
    pub address: String,
    /// API prefix appended to `address`
    pub base_path: String,
    /// Bearer token sent with every request
    pub token: String,
    /// Transport timeout; `None` leaves requests unbounded
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    /// Not-found handling for organization deletes
    pub organization_delete: NotFoundPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            token: String::new(),
            timeout_secs: None,
            user_agent: None,
            organization_delete: NotFoundPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Default configuration with the given token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: token.into(), ..Self::default() }
    }

    /// Absolute API root: `address` + `base_path`, always ending in `/`
    pub fn base_url(&self) -> String {
        let address = self.address.trim_end_matches('/');
        let path = self.base_path.trim_matches('/');
        if path.is_empty() {
            format!("{}/", address)
        } else {
            format!("{}/{}/", address, path)
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("address", &self.address)
            .field("base_path", &self.base_path)
            .field("token", &if self.token.is_empty() { "<unset>" } else { "<redacted>" })
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("organization_delete", &self.organization_delete)
            .finish()
    }
}
