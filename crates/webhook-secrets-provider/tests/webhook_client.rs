// crates/webhook-secrets-provider/tests/webhook_client.rs
// ============================================================================
// Module: Webhook Client Tests
// Description: End-to-end fetch pipeline tests against a local HTTP server.
// Purpose: Validate rendering, execution, extraction, and fail-closed errors.
// Dependencies: webhook-secrets-provider, webhook-secrets-core, tiny_http
// ============================================================================

//! ## Overview
//! Tests the webhook client for:
//! - Happy path: plaintext and `JSONPath` extraction
//! - Error handling: malformed JSON, missing paths, wrong types, remote errors
//! - Rendering: bindings in headers and bodies, template failures
//! - Scoping: cluster stores, missing namespaces, lookup failures

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::time::Duration;
use std::time::Instant;

use webhook_secrets_core::InMemorySecretLookup;
use webhook_secrets_core::JsonKind;
use webhook_secrets_core::ObjectKey;
use webhook_secrets_core::RemoteRef;
use webhook_secrets_core::SecretBinding;
use webhook_secrets_core::SecretKeySelector;
use webhook_secrets_core::SecretsError;
use webhook_secrets_core::StoreKind;
use webhook_secrets_core::TemplateField;
use webhook_secrets_provider::HttpSettings;

use crate::common::TEST_NAMESPACE;
use crate::common::client;
use crate::common::client_with_settings;
use crate::common::closed_url;
use crate::common::silent_server;
use crate::common::spawn_server;
use crate::common::store;
use crate::common::webhook_config;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// URL template used by the versioned lookup scenarios.
const VERSIONED_PATH: &str =
    "/api/getsecret?id={{ remoteRef.key }}&version={{ remoteRef.version }}";

/// Reference used by the versioned lookup scenarios.
fn versioned_ref() -> RemoteRef {
    RemoteRef::new("testkey").with_version("1")
}

/// Runs a versioned fetch against a server returning `status` and `body`.
fn fetch_versioned(
    status: u16,
    body: &'static str,
    json_path: &str,
) -> Result<Vec<u8>, SecretsError> {
    let (base_url, handle) = spawn_server(status, body);
    let store = store(webhook_config(&format!("{base_url}{VERSIONED_PATH}"), json_path));
    let result = client(&store, &InMemorySecretLookup::new()).get_secret(&versioned_ref());
    let captured = handle.join().unwrap().expect("server should receive a request");
    assert_eq!(captured.url, "/api/getsecret?id=testkey&version=1");
    assert_eq!(captured.method, "GET");
    result
}

/// Builds a binding exposing `secret` under `name`.
fn binding(name: &str, secret: &str, namespace: Option<&str>) -> SecretBinding {
    SecretBinding {
        name: name.to_string(),
        secret_ref: SecretKeySelector {
            name: secret.to_string(),
            key: String::new(),
            namespace: namespace.map(str::to_string),
        },
    }
}

// ============================================================================
// SECTION: Happy Path
// ============================================================================

#[test]
fn plaintext_response_is_returned_verbatim() {
    let secret = fetch_versioned(200, "secret-value", "").unwrap();
    assert_eq!(secret, b"secret-value");
}

#[test]
fn json_path_selects_string_value() {
    let secret =
        fetch_versioned(200, r#"{"result":{"thesecret":"secret-value"}}"#, "$.result.thesecret")
            .unwrap();
    assert_eq!(secret, b"secret-value");
}

#[test]
fn bindings_render_into_headers_and_body() {
    let (base_url, handle) = spawn_server(200, "ok");
    let lookup = InMemorySecretLookup::new();
    lookup
        .insert_secret(ObjectKey::new(TEST_NAMESPACE, "webhook-credentials"), [("token", "s3cr3t")])
        .unwrap();
    let mut config = webhook_config(&format!("{base_url}/lookup"), "");
    config.method = "POST".to_string();
    config.body = r#"{"key":"{{ remoteRef.key }}"}"#.to_string();
    config.headers.insert("X-Token".to_string(), "{{ auth.token }}".to_string());
    config.headers.insert("Content-Type".to_string(), "application/json".to_string());
    config.secrets.push(binding("auth", "webhook-credentials", None));

    let secret = client(&store(config), &lookup).get_secret(&RemoteRef::new("db-password")).unwrap();
    let captured = handle.join().unwrap().unwrap();

    assert_eq!(secret, b"ok");
    assert_eq!(captured.method, "POST");
    assert_eq!(captured.header("X-Token"), Some("s3cr3t"));
    assert_eq!(captured.header("Content-Type"), Some("application/json"));
    assert_eq!(captured.body, r#"{"key":"db-password"}"#);
}

#[test]
fn remote_key_is_query_escaped_in_url() {
    let (base_url, handle) = spawn_server(200, "ok");
    let store = store(webhook_config(&format!("{base_url}/s?id={{{{ remoteRef.key }}}}"), ""));
    client(&store, &InMemorySecretLookup::new()).get_secret(&RemoteRef::new("a b&c")).unwrap();
    let captured = handle.join().unwrap().unwrap();
    assert_eq!(captured.url, "/s?id=a+b%26c");
}

#[test]
fn cluster_store_reads_bindings_from_explicit_namespace() {
    let (base_url, handle) = spawn_server(200, "ok");
    let lookup = InMemorySecretLookup::new();
    lookup.insert_secret(ObjectKey::new("infra", "creds"), [("token", "cluster")]).unwrap();
    let mut config = webhook_config(&format!("{base_url}/"), "");
    config.headers.insert("X-Token".to_string(), "{{ auth.token }}".to_string());
    config.secrets.push(binding("auth", "creds", Some("infra")));
    let mut store = store(config);
    store.kind = StoreKind::ClusterSecretStore;

    client(&store, &lookup).get_secret(&RemoteRef::new("k")).unwrap();
    let captured = handle.join().unwrap().unwrap();
    assert_eq!(captured.header("X-Token"), Some("cluster"));
}

// ============================================================================
// SECTION: Extraction Errors
// ============================================================================

#[test]
fn truncated_json_is_invalid_json() {
    let err =
        fetch_versioned(200, r#"{"result":{"thesecret":"secret-value"}"#, "$.result.thesecret")
            .unwrap_err();
    assert!(matches!(err, SecretsError::InvalidJson(_)), "unexpected error: {err}");
}

#[test]
fn missing_json_path_is_path_not_found() {
    let err =
        fetch_versioned(200, r#"{"result":{"nosecret":"secret-value"}}"#, "$.result.thesecret")
            .unwrap_err();
    assert!(matches!(err, SecretsError::PathNotFound { .. }), "unexpected error: {err}");
}

#[test]
fn object_result_is_unexpected_type() {
    let err = fetch_versioned(
        200,
        r#"{"result":{"thesecret":{"one":"secret-value"}}}"#,
        "$.result.thesecret",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SecretsError::UnexpectedResultType {
            found: JsonKind::Object
        }
    ));
}

#[test]
fn non_success_status_is_remote_error() {
    let err = fetch_versioned(404, "not found", "").unwrap_err();
    assert!(matches!(err, SecretsError::RemoteError { .. }));
    assert!(err.to_string().contains("404"), "unexpected error: {err}");
}

// ============================================================================
// SECTION: Pre-Request Failures
// ============================================================================

#[test]
fn url_template_error_sends_no_request() {
    let (base_url, handle) = spawn_server(200, "ok");
    let store = store(webhook_config(&format!("{base_url}/{{{{ remoteRef.key "), ""));
    let err = client(&store, &InMemorySecretLookup::new()).get_secret(&RemoteRef::new("k")).unwrap_err();
    assert!(matches!(
        err,
        SecretsError::Template {
            field: TemplateField::Url,
            ..
        }
    ));
    assert!(handle.join().unwrap().is_none());
}

#[test]
fn undefined_binding_in_body_is_template_error() {
    let (base_url, handle) = spawn_server(200, "ok");
    let mut config = webhook_config(&format!("{base_url}/"), "");
    config.body = "{{ missing.value }}".to_string();
    let err = client(&store(config), &InMemorySecretLookup::new())
        .get_secret(&RemoteRef::new("k"))
        .unwrap_err();
    assert!(matches!(
        err,
        SecretsError::Template {
            field: TemplateField::Body,
            ..
        }
    ));
    assert!(handle.join().unwrap().is_none());
}

#[test]
fn header_template_error_names_header() {
    let (base_url, handle) = spawn_server(200, "ok");
    let mut config = webhook_config(&format!("{base_url}/"), "");
    config.headers.insert("X-SecretKey".to_string(), "{{ remoteRef.key | nosuchfilter }}".to_string());
    let err = client(&store(config), &InMemorySecretLookup::new())
        .get_secret(&RemoteRef::new("k"))
        .unwrap_err();
    assert!(err.to_string().starts_with("failed to parse header X-SecretKey"), "got: {err}");
    assert!(handle.join().unwrap().is_none());
}

#[test]
fn missing_binding_secret_fails_lookup() {
    let (base_url, handle) = spawn_server(200, "ok");
    let mut config = webhook_config(&format!("{base_url}/"), "");
    config.secrets.push(binding("auth", "absent", None));
    let err = client(&store(config), &InMemorySecretLookup::new())
        .get_secret(&RemoteRef::new("k"))
        .unwrap_err();
    assert_eq!(err.kind(), "secret_lookup_failed");
    assert!(err.to_string().contains("absent"));
    assert!(handle.join().unwrap().is_none());
}

#[test]
fn cluster_store_binding_without_namespace_fails() {
    let mut config = webhook_config(&closed_url(), "");
    config.secrets.push(binding("auth", "creds", None));
    let mut store = store(config);
    store.kind = StoreKind::ClusterSecretStore;
    let err = client(&store, &InMemorySecretLookup::new()).get_secret(&RemoteRef::new("k")).unwrap_err();
    assert!(matches!(err, SecretsError::MissingNamespace { .. }));
}

#[test]
fn unreachable_endpoint_is_request_failure() {
    let store = store(webhook_config(&format!("{}/secret", closed_url()), ""));
    let err = client(&store, &InMemorySecretLookup::new()).get_secret(&RemoteRef::new("k")).unwrap_err();
    assert!(matches!(err, SecretsError::RequestFailed(_)), "unexpected error: {err}");
}

#[test]
fn oversized_response_is_read_error() {
    let (base_url, handle) = spawn_server(200, "0123456789abcdef");
    let store = store(webhook_config(&format!("{base_url}/secret"), ""));
    let settings = HttpSettings {
        timeout_ms: 2_000,
        max_response_bytes: 8,
        ..HttpSettings::default()
    };
    let err = client_with_settings(&store, &InMemorySecretLookup::new(), settings)
        .get_secret(&RemoteRef::new("k"))
        .unwrap_err();
    handle.join().unwrap();
    assert_eq!(err.kind(), "response_read_error");
    assert!(err.to_string().contains("response exceeds size limit"), "unexpected error: {err}");
}

#[test]
fn response_at_size_limit_is_accepted() {
    let (base_url, handle) = spawn_server(200, "01234567");
    let store = store(webhook_config(&format!("{base_url}/secret"), ""));
    let settings = HttpSettings {
        timeout_ms: 2_000,
        max_response_bytes: 8,
        ..HttpSettings::default()
    };
    let secret = client_with_settings(&store, &InMemorySecretLookup::new(), settings)
        .get_secret(&RemoteRef::new("k"))
        .unwrap();
    handle.join().unwrap();
    assert_eq!(secret, b"01234567");
}

#[test]
fn stalled_endpoint_fails_after_timeout() {
    let (base_url, _listener) = silent_server();
    let store = store(webhook_config(&format!("{base_url}/secret"), ""));
    let settings = HttpSettings {
        timeout_ms: 200,
        ..HttpSettings::default()
    };
    let started = Instant::now();
    let err = client_with_settings(&store, &InMemorySecretLookup::new(), settings)
        .get_secret(&RemoteRef::new("k"))
        .unwrap_err();
    assert!(matches!(err, SecretsError::RequestFailed(_)), "unexpected error: {err}");
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn head_request_yields_empty_secret() {
    let (base_url, handle) = spawn_server(200, "secret-value");
    let mut webhook = webhook_config(&format!("{base_url}/secret"), "");
    webhook.method = "HEAD".to_string();
    let secret = client(&store(webhook), &InMemorySecretLookup::new())
        .get_secret(&RemoteRef::new("k"))
        .unwrap();
    let captured = handle.join().unwrap().expect("server should receive a request");
    assert_eq!(captured.method, "HEAD");
    assert!(secret.is_empty());
}

#[test]
fn store_without_webhook_config_fails() {
    let mut store = store(webhook_config("http://unused", ""));
    store.webhook = None;
    let err = client(&store, &InMemorySecretLookup::new()).get_secret(&RemoteRef::new("k")).unwrap_err();
    assert_eq!(err.kind(), "missing_provider_config");
}

// ============================================================================
// SECTION: Unsupported Operations
// ============================================================================

#[test]
fn secret_map_is_not_implemented() {
    let store = store(webhook_config(&closed_url(), ""));
    let client = client(&store, &InMemorySecretLookup::new());
    let err = client.get_secret_map(&RemoteRef::new("k")).unwrap_err();
    assert!(matches!(err, SecretsError::NotImplemented(_)));
    assert_eq!(err.to_string(), "GetSecretMap not implemented");
}

#[test]
fn close_is_a_no_op() {
    let store = store(webhook_config(&closed_url(), ""));
    let client = client(&store, &InMemorySecretLookup::new());
    assert!(client.close().is_ok());
    assert!(client.close().is_ok());
}
