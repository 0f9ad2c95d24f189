use std::io;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tfe_domain::ClientConfig;
use tfe_infra::{ApiClient, HttpClient, TfeClient};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-token";

/// Configuration pointing at the mock server with the default API prefix.
pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig { address: server.uri(), ..ClientConfig::with_token(TEST_TOKEN) }
}

/// Client for the mock server that ignores proxy settings from the
/// environment.
pub fn client_for(config: ClientConfig) -> TfeClient {
    let http = HttpClient::builder().system_proxy(false).build().expect("http client should build");
    let api = ApiClient::builder()
        .config(config)
        .http_client(http)
        .build()
        .expect("api client should build");
    TfeClient::new(api)
}

/// JSON-API document for a single organization.
pub fn organization_document(name: &str) -> Value {
    json!({"data": organization_resource(name)})
}

pub fn organization_resource(name: &str) -> Value {
    json!({
        "type": "organizations",
        "id": name,
        "attributes": {
            "name": name,
            "email": format!("admin@{}.test", name),
            "collaborator-auth-policy": "password",
            "enterprise-plan": "premium",
            "created-at": "2018-03-02T23:42:06.651Z",
            "saml-enabled": false
        }
    })
}

/// JSON-API document for a registry module owned by `organization`.
pub fn module_document(organization: &str, oauth_token_id: &str, identifier: &str) -> Value {
    json!({
        "data": {
            "type": "registry-modules",
            "id": "mod-kwt1cBiX2SdDz38w",
            "attributes": {
                "name": "consul",
                "provider": "aws",
                "status": "pending",
                "vcs-repo": {"oauth-token-id": oauth_token_id, "identifier": identifier},
                "permissions": {"can-delete": true, "can-resync": true, "can-retry": true}
            },
            "relationships": {
                "organization": {"data": {"type": "organizations", "id": organization}}
            }
        }
    })
}

/// Handle for inspecting formatted log output during tests.
pub struct LogHandle {
    buffer: Arc<Mutex<Vec<u8>>>,
    _guard: DefaultGuard,
}

impl LogHandle {
    /// Return all captured log lines.
    pub fn lines(&self) -> Vec<String> {
        let guard = self.buffer.lock().expect("log mutex poisoned");
        String::from_utf8_lossy(&guard).lines().map(str::to_string).collect()
    }

    /// Check whether a line at `level` contains `needle`.
    pub fn contains(&self, level: &str, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(level) && line.contains(needle))
    }
}

#[derive(Clone)]
struct BufferWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self.buffer.lock().expect("log mutex poisoned");
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Install a capturing subscriber for the current thread.
///
/// `#[tokio::test]` runs on a current-thread runtime, so events from the
/// awaited client calls land in this buffer.
pub fn init_test_logger() -> LogHandle {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt()
        .with_writer(BufferWriter { buffer: Arc::clone(&buffer) })
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);

    LogHandle { buffer, _guard: guard }
}
