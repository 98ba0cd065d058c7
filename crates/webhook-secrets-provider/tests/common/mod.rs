// crates/webhook-secrets-provider/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared servers, stores, and lookups for provider tests.
// Purpose: Provide reusable test infrastructure for deterministic testing.
// Dependencies: webhook-secrets-provider, webhook-secrets-core, tiny_http
// ============================================================================

//! ## Overview
//! Helpers for spinning up a one-shot capture server, building webhook store
//! specs, and creating clients against an in-memory secret lookup.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tiny_http::Response;
use tiny_http::Server;
use webhook_secrets_core::InMemorySecretLookup;
use webhook_secrets_core::SecretsClient;
use webhook_secrets_core::StoreKind;
use webhook_secrets_core::StoreSpec;
use webhook_secrets_core::WebhookProviderConfig;
use webhook_secrets_core::WebhookResult;
use webhook_secrets_provider::HttpSettings;
use webhook_secrets_provider::Provider;
use webhook_secrets_provider::WebhookProvider;

// ============================================================================
// SECTION: Capture Server
// ============================================================================

/// Request observed by the capture server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// HTTP method.
    pub method: String,
    /// Request path and query.
    pub url: String,
    /// Header pairs in arrival order.
    pub headers: Vec<(String, String)>,
    /// Raw request body.
    pub body: String,
}

impl CapturedRequest {
    /// Returns the first header value matching `name` case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Spawns a server that answers one request and returns what it received.
///
/// The handle yields `None` when no request arrives within two seconds.
pub fn spawn_server(
    status: u16,
    body: &'static str,
) -> (String, thread::JoinHandle<Option<CapturedRequest>>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let base_url = format!("http://{addr}");

    let handle = thread::spawn(move || {
        let mut request = server.recv_timeout(Duration::from_secs(2)).ok().flatten()?;
        let mut received = String::new();
        let _ = request.as_reader().read_to_string(&mut received);
        let captured = CapturedRequest {
            method: request.method().as_str().to_string(),
            url: request.url().to_string(),
            headers: request
                .headers()
                .iter()
                .map(|header| (header.field.as_str().as_str().to_string(), header.value.as_str().to_string()))
                .collect(),
            body: received,
        };
        let _ = request.respond(Response::from_string(body).with_status_code(status));
        Some(captured)
    });

    (base_url, handle)
}

/// Binds a listener that accepts connections but never answers.
///
/// The listener must be kept alive for the duration of the test.
pub fn silent_server() -> (String, TcpListener) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    (format!("http://{addr}"), listener)
}

/// Returns a URL with nothing listening on it.
pub fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

// ============================================================================
// SECTION: Store Fixtures
// ============================================================================

/// Namespace used by namespaced test stores.
pub const TEST_NAMESPACE: &str = "apps";

/// Builds a webhook config with the given URL template and result path.
pub fn webhook_config(url: &str, json_path: &str) -> WebhookProviderConfig {
    WebhookProviderConfig {
        method: String::new(),
        url: url.to_string(),
        headers: BTreeMap::new(),
        body: String::new(),
        result: WebhookResult {
            json_path: json_path.to_string(),
        },
        secrets: Vec::new(),
        ca_bundle: None,
        ca_provider: None,
    }
}

/// Wraps a webhook config in a namespaced store.
pub fn store(webhook: WebhookProviderConfig) -> StoreSpec {
    StoreSpec {
        name: "webhook-test".to_string(),
        kind: StoreKind::SecretStore,
        webhook: Some(webhook),
    }
}

/// Creates a client for `store` with short timeouts.
pub fn client(store: &StoreSpec, lookup: &InMemorySecretLookup) -> Box<dyn SecretsClient + Send + Sync> {
    let settings = HttpSettings {
        timeout_ms: 2_000,
        ..HttpSettings::default()
    };
    client_with_settings(store, lookup, settings)
}

/// Creates a client for `store` with explicit HTTP settings.
pub fn client_with_settings(
    store: &StoreSpec,
    lookup: &InMemorySecretLookup,
    settings: HttpSettings,
) -> Box<dyn SecretsClient + Send + Sync> {
    WebhookProvider::new(settings)
        .new_client(store, Arc::new(lookup.clone()), TEST_NAMESPACE)
        .unwrap()
}
