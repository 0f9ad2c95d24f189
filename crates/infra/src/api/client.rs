//! API client for the JSON-API endpoints
//!
//! Resolves relative resource paths against the configured API root,
//! attaches the bearer token and media type headers, and maps HTTP status
//! codes onto [`ApiError`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tfe_domain::constants::JSONAPI_MEDIA_TYPE;
use tfe_domain::{ClientConfig, TfeError};
use tracing::{debug, info, instrument};
use url::Url;

use super::auth::{AccessTokenProvider, StaticTokenProvider};
use super::errors::ApiError;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// API client bound to one service address and one token provider
///
/// Holds only immutable state, so it can be wrapped in an `Arc` and shared
/// between tasks.
pub struct ApiClient {
    http_client: Arc<HttpClient>,
    auth: Arc<dyn AccessTokenProvider>,
    config: ClientConfig,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// The transport gets the configured user agent; each call, including
    /// reading the response body, is bounded by `timeout_secs` when it is set.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the API root is not a valid URL or the
    /// transport cannot be built.
    pub fn new(config: ClientConfig, auth: Arc<dyn AccessTokenProvider>) -> Result<Self, ApiError> {
        let mut builder = HttpClient::builder();
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let http_client = builder
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {}", e)))?;

        Self::with_http_client(config, auth, http_client)
    }

    /// Create a client over a caller-built transport, used as-is.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the API root is not a valid URL.
    pub fn with_http_client(
        config: ClientConfig,
        auth: Arc<dyn AccessTokenProvider>,
        http_client: HttpClient,
    ) -> Result<Self, ApiError> {
        let base_url = parse_base_url(&config)?;
        Ok(Self { http_client: Arc::new(http_client), auth, config, base_url })
    }

    /// Create a client that authenticates with `config.token`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the token is empty or the API root is
    /// invalid.
    pub fn from_config(config: ClientConfig) -> Result<Self, ApiError> {
        if config.token.trim().is_empty() {
            return Err(ApiError::Config("API token is not set".to_string()));
        }
        let auth = Arc::new(StaticTokenProvider::new(config.token.clone()));
        Self::new(config, auth)
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Configuration this client was built from
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute API root every resource path is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Execute a GET request and decode the response document.
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let result = self
            .bounded(async {
                let response = self.execute(Method::GET, path, None).await?;
                Self::decode(response).await
            })
            .await?;

        info!(path = %path, "GET request successful");
        Ok(result)
    }

    /// Execute a POST request with a JSON-API body.
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let body = Self::encode(body)?;
        let result = self
            .bounded(async {
                let response = self.execute(Method::POST, path, Some(body)).await?;
                Self::decode(response).await
            })
            .await?;

        info!(path = %path, "POST request successful");
        Ok(result)
    }

    /// Execute a PATCH request with a JSON-API body.
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn patch<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let body = Self::encode(body)?;
        let result = self
            .bounded(async {
                let response = self.execute(Method::PATCH, path, Some(body)).await?;
                Self::decode(response).await
            })
            .await?;

        info!(path = %path, "PATCH request successful");
        Ok(result)
    }

    /// Execute a DELETE request. Any response body is discarded.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` on 404 and the mapped error for any
    /// other failure.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.bounded(self.execute(Method::DELETE, path, None)).await?;

        info!(path = %path, "DELETE request successful");
        Ok(())
    }

    /// Send one request and reject non-success statuses.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Response, ApiError> {
        let url = self.resolve(path)?;
        debug!(%method, url = %url, "API request");

        let token = self.auth.access_token().await?;

        let mut request = self
            .http_client
            .request(method, url.clone())
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(ACCEPT, JSONAPI_MEDIA_TYPE);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, JSONAPI_MEDIA_TYPE).body(body);
        }

        let response = self.http_client.send(request).await.map_err(Self::map_tfe_error)?;

        let status = response.status();
        debug!(url = %url, %status, "API response");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status_error(status, url.as_str(), body));
        }

        Ok(response)
    }

    /// Run one whole call under the configured timeout, if any.
    async fn bounded<T, F>(&self, call: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        match self.timeout() {
            Some(timeout) => tokio::time::timeout(timeout, call)
                .await
                .map_err(|_| ApiError::Timeout(timeout))?,
            None => call.await,
        }
    }

    /// Resolve `path` below the API root.
    ///
    /// `.` and `..` segments (including their percent-encoded spellings) are
    /// refused, as is any path that would resolve outside the root.
    fn resolve(&self, path: &str) -> Result<Url, ApiError> {
        let relative = path.trim_start_matches('/');
        if relative.split('/').any(is_dot_segment) {
            return Err(ApiError::Config(format!(
                "Resource path '{}' contains a relative segment",
                path
            )));
        }

        let url = self.base_url.join(relative).map_err(|e| {
            let infra: InfraError = e.into();
            ApiError::from(TfeError::from(infra))
        })?;
        if !url.as_str().starts_with(self.base_url.as_str()) {
            return Err(ApiError::Config(format!(
                "Resource path '{}' resolves outside {}",
                path, self.base_url
            )));
        }
        Ok(url)
    }

    fn timeout(&self) -> Option<Duration> {
        self.config.timeout_secs.map(Duration::from_secs)
    }

    fn encode<T: Serialize>(body: &T) -> Result<Vec<u8>, ApiError> {
        serde_json::to_vec(body)
            .map_err(|e| ApiError::Client(format!("Failed to serialize body: {}", e)))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();

        // 204/205 carry no body
        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Decode(format!(
                    "No content response ({}), but the response type needs a body",
                    status.as_u16()
                ))
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            let infra: InfraError = e.into();
            Self::map_tfe_error(infra.into())
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            let infra: InfraError = e.into();
            Self::map_tfe_error(infra.into())
        })
    }

    fn map_status_error(status: StatusCode, url: &str, body: String) -> ApiError {
        let message = if body.is_empty() {
            format!("{} returned status {}", url, status)
        } else {
            format!("{} returned status {}: {}", url, status, body)
        };

        if status == StatusCode::NOT_FOUND {
            ApiError::NotFound(message)
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            ApiError::Auth(message)
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            ApiError::RateLimit(message)
        } else if status.is_server_error() {
            ApiError::Server(message)
        } else if status.is_client_error() {
            ApiError::Client(message)
        } else {
            ApiError::Network(message)
        }
    }

    fn map_tfe_error(err: TfeError) -> ApiError {
        ApiError::from(err)
    }
}

/// `.` or `..`, spelled literally or with `%2e` in either case.
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

fn parse_base_url(config: &ClientConfig) -> Result<Url, ApiError> {
    Url::parse(&config.base_url()).map_err(|e| {
        ApiError::Config(format!("Invalid API address '{}': {}", config.base_url(), e))
    })
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ClientConfig>,
    auth: Option<Arc<dyn AccessTokenProvider>>,
    http_client: Option<HttpClient>,
}

impl ApiClientBuilder {
    /// Set the client configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the authentication provider
    pub fn auth(mut self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Use a pre-built transport instead of one derived from the config
    pub fn http_client(mut self, http_client: HttpClient) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Build the API client
    ///
    /// Without an explicit provider the config's token is used.
    ///
    /// # Errors
    ///
    /// Returns error if no token source is available or client creation
    /// fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let auth = match self.auth {
            Some(auth) => auth,
            None if !config.token.trim().is_empty() => {
                Arc::new(StaticTokenProvider::new(config.token.clone()))
            }
            None => return Err(ApiError::Config("Auth provider not set".to_string())),
        };

        match self.http_client {
            Some(http_client) => ApiClient::with_http_client(config, auth, http_client),
            None => ApiClient::new(config, auth),
        }
    }
}
