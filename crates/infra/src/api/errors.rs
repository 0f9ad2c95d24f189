//! API-specific error types
//!
//! Classifies failures of resource operations so callers can tell local
//! validation, missing resources and transport trouble apart.

use std::time::Duration;

use tfe_common::validation::ValidationError;
use tfe_domain::TfeError;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Input rejected locally, no request was sent
    Validation,
    /// The addressed resource does not exist (404)
    NotFound,
    /// Authentication errors (401, 403)
    Authentication,
    /// Rate limiting errors (429)
    RateLimit,
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx other than the above)
    Client,
    /// Network/connection errors and timeouts
    Network,
    /// Configuration errors
    Config,
    /// Response body was not the expected document
    Decode,
    /// Bug or broken invariant inside the client itself
    Internal,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Validation(_) => ApiErrorCategory::Validation,
            Self::NotFound(_) => ApiErrorCategory::NotFound,
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::Client(_) => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Config(_) => ApiErrorCategory::Config,
            Self::Decode(_) => ApiErrorCategory::Decode,
            Self::Internal(_) => ApiErrorCategory::Internal,
        }
    }

    /// True when the server reported the target as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Validation details, if the call was rejected before any request.
    pub fn validation_errors(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<TfeError> for ApiError {
    fn from(err: TfeError) -> Self {
        match err {
            TfeError::Network(message) => Self::Network(message),
            TfeError::Auth(message) => Self::Auth(message),
            TfeError::NotFound(message) => Self::NotFound(message),
            TfeError::Config(message) => Self::Config(message),
            TfeError::InvalidInput(message) => Self::Client(message),
            TfeError::Envelope(message) => Self::Decode(message),
            TfeError::Internal(message) => Self::Internal(message),
        }
    }
}
