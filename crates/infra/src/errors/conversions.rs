//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use tfe_domain::TfeError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub TfeError);

impl From<InfraError> for TfeError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<TfeError> for InfraError {
    fn from(value: TfeError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoTfeError {
    fn into_tfe(self) -> TfeError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TfeError */
/* -------------------------------------------------------------------------- */

impl IntoTfeError for HttpError {
    fn into_tfe(self) -> TfeError {
        if self.is_timeout() {
            return TfeError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return TfeError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return TfeError::Config(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => TfeError::Auth(message),
                404 => TfeError::NotFound(message),
                400..=499 => TfeError::InvalidInput(message),
                _ => TfeError::Network(message),
            };
        }

        if self.is_decode() {
            return TfeError::Envelope(format!("failed to read response body: {self}"));
        }

        TfeError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_tfe())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → TfeError */
/* -------------------------------------------------------------------------- */

impl IntoTfeError for JsonError {
    fn into_tfe(self) -> TfeError {
        if self.is_data() || self.is_syntax() || self.is_eof() {
            TfeError::Envelope(format!(
                "response is not a valid JSON-API document (line {}, column {}): {}",
                self.line(),
                self.column(),
                self
            ))
        } else {
            TfeError::Internal(format!("JSON processing failed: {self}"))
        }
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_tfe())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → TfeError */
/* -------------------------------------------------------------------------- */

impl IntoTfeError for UrlError {
    fn into_tfe(self) -> TfeError {
        TfeError::Config(format!("invalid URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_tfe())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn status_error(status: StatusCode) -> HttpError {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err()
    }

    #[tokio::test]
    async fn http_status_401_maps_to_auth_error() {
        let mapped: TfeError =
            InfraError::from(status_error(StatusCode::UNAUTHORIZED).await).into();
        match mapped {
            TfeError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn http_status_404_maps_to_not_found() {
        let mapped: TfeError = InfraError::from(status_error(StatusCode::NOT_FOUND).await).into();
        assert!(matches!(mapped, TfeError::NotFound(msg) if msg.contains("404")));
    }

    #[tokio::test]
    async fn http_status_422_maps_to_invalid_input() {
        let mapped: TfeError =
            InfraError::from(status_error(StatusCode::UNPROCESSABLE_ENTITY).await).into();
        assert!(matches!(mapped, TfeError::InvalidInput(_)));
    }

    #[test]
    fn malformed_json_maps_to_envelope_error() {
        let err = serde_json::from_str::<serde_json::Value>("{\"data\": ").unwrap_err();
        let mapped: TfeError = InfraError::from(err).into();
        assert!(matches!(mapped, TfeError::Envelope(_)));
    }

    #[test]
    fn bad_url_maps_to_config_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let mapped: TfeError = InfraError::from(err).into();
        assert!(matches!(mapped, TfeError::Config(msg) if msg.contains("invalid URL")));
    }
}
