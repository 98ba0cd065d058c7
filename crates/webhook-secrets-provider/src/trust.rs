// crates/webhook-secrets-provider/src/trust.rs
// ============================================================================
// Module: Trust Resolver
// Description: Builds HTTP clients with CA trust from inline or stored PEM data.
// Purpose: Let webhook requests verify endpoints signed by private CAs.
// Dependencies: webhook-secrets-core, reqwest, rustls-pki-types
// ============================================================================

//! ## Overview
//! Without custom trust material the client uses the default root set. When
//! an inline bundle or a CA provider is configured the built-in roots are
//! disabled and only the configured certificates are trusted.
//! Invariants:
//! - Every PEM source must contribute at least one certificate.
//! - Cluster-scoped stores must name the CA provider namespace explicitly.
//! - Unknown CA provider kinds fail before any lookup is attempted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use reqwest::Certificate;
use reqwest::blocking::Client;
use reqwest::blocking::ClientBuilder;
use rustls_pki_types::CertificateDer;
use rustls_pki_types::pem::PemObject;
use tracing::debug;
use webhook_secrets_core::CaProvider;
use webhook_secrets_core::CaProviderKind;
use webhook_secrets_core::ClientScope;
use webhook_secrets_core::LookupError;
use webhook_secrets_core::SecretLookup;
use webhook_secrets_core::SecretsError;
use webhook_secrets_core::WebhookProviderConfig;

use crate::settings::HttpSettings;

// ============================================================================
// SECTION: Client Construction
// ============================================================================

/// Lookup purpose label for CA provider fetches.
const CA_PROVIDER_PURPOSE: &str = "ca provider";

/// Builds the HTTP client for a webhook request.
///
/// # Errors
///
/// Returns [`SecretsError::InvalidCaBundle`] when PEM data holds no
/// certificates, [`SecretsError::MissingNamespace`] or
/// [`SecretsError::UnknownCaProviderType`] for invalid CA references,
/// [`SecretsError::SecretLookupFailed`] when CA material cannot be fetched, and
/// [`SecretsError::RequestBuildFailed`] when the client cannot be built.
pub fn build_http_client(
    config: &WebhookProviderConfig,
    settings: &HttpSettings,
    scope: &ClientScope,
    lookup: &dyn SecretLookup,
) -> Result<Client, SecretsError> {
    let builder = base_builder(settings);
    if !config.has_custom_trust() {
        return finish(builder);
    }

    let mut roots = Vec::new();
    if let Some(bundle) = config.ca_bundle.as_deref().filter(|bundle| !bundle.is_empty()) {
        roots.extend(decode_pem_certificates(bundle.as_bytes(), "ca_bundle")?);
    }
    if let Some(provider) = &config.ca_provider {
        let pem = fetch_ca_pem(provider, scope, lookup)?;
        let origin = format!("{} {}", provider.kind, provider.name);
        roots.extend(decode_pem_certificates(&pem, &origin)?);
    }
    debug!(certificates = roots.len(), "installing custom webhook trust roots");

    finish(builder.tls_certs_only(roots))
}

/// Returns a client builder carrying timeout and user agent settings.
fn base_builder(settings: &HttpSettings) -> ClientBuilder {
    Client::builder()
        .timeout(Duration::from_millis(settings.timeout_ms))
        .user_agent(settings.user_agent.clone())
}

/// Builds the client from a configured builder.
fn finish(builder: ClientBuilder) -> Result<Client, SecretsError> {
    builder
        .build()
        .map_err(|err| SecretsError::RequestBuildFailed(format!("http client build failed: {err}")))
}

// ============================================================================
// SECTION: CA Material
// ============================================================================

/// Decodes every certificate in a PEM buffer.
///
/// Non-certificate PEM sections are skipped.
///
/// # Errors
///
/// Returns [`SecretsError::InvalidCaBundle`] when the buffer is malformed or
/// holds no certificates.
pub fn decode_pem_certificates(pem: &[u8], origin: &str) -> Result<Vec<Certificate>, SecretsError> {
    let invalid = || SecretsError::InvalidCaBundle {
        origin: origin.to_string(),
    };
    let mut certificates = Vec::new();
    for der in CertificateDer::pem_slice_iter(pem) {
        let der = der.map_err(|_| invalid())?;
        certificates.push(Certificate::from_der(der.as_ref()).map_err(|_| invalid())?);
    }
    if certificates.is_empty() {
        return Err(invalid());
    }
    Ok(certificates)
}

/// Fetches PEM data for a CA provider reference.
fn fetch_ca_pem(
    provider: &CaProvider,
    scope: &ClientScope,
    lookup: &dyn SecretLookup,
) -> Result<Vec<u8>, SecretsError> {
    let object = scope.resolve(&provider.name, provider.namespace.as_deref())?;
    let lookup_failed = |source| SecretsError::SecretLookupFailed {
        purpose: CA_PROVIDER_PURPOSE,
        name: provider.name.clone(),
        source,
    };
    match &provider.kind {
        CaProviderKind::Secret => {
            let mut data = lookup.get_keyed_secret(&object).map_err(lookup_failed)?;
            let value = data.remove(&provider.key).ok_or_else(|| {
                lookup_failed(LookupError::MissingKey {
                    object: object.clone(),
                    key: provider.key.clone(),
                })
            })?;
            Ok(String::from_utf8_lossy(&value).trim().as_bytes().to_vec())
        }
        CaProviderKind::ConfigMap => {
            let mut data = lookup.get_keyed_config(&object).map_err(lookup_failed)?;
            let value = data.remove(&provider.key).ok_or_else(|| {
                lookup_failed(LookupError::MissingKey {
                    object: object.clone(),
                    key: provider.key.clone(),
                })
            })?;
            Ok(value.into_bytes())
        }
        CaProviderKind::Unknown(label) => Err(SecretsError::UnknownCaProviderType(label.clone())),
    }
}
