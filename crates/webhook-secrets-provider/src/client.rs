// crates/webhook-secrets-provider/src/client.rs
// ============================================================================
// Module: Webhook Client
// Description: Secrets client that fetches values through templated requests.
// Purpose: Orchestrate context, rendering, trust, execution, and extraction.
// Dependencies: webhook-secrets-core, tracing
// ============================================================================

//! ## Overview
//! [`WebhookClient`] implements [`SecretsClient`] for one store. Each
//! [`SecretsClient::get_secret`] call runs the full pipeline from scratch:
//! 1. Build the template context from the remote ref and secret bindings.
//! 2. Render the URL, body, and headers.
//! 3. Build an HTTP client with the store's trust material.
//! 4. Send the request and extract the secret from the response.
//!
//! The first failing step aborts the call; no request is sent when a lookup
//! or template step fails.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;
use tracing::warn;
use webhook_secrets_core::ClientScope;
use webhook_secrets_core::RemoteRef;
use webhook_secrets_core::SecretsClient;
use webhook_secrets_core::SecretsError;
use webhook_secrets_core::StoreSpec;
use webhook_secrets_core::TemplateField;

use crate::context::build_context;
use crate::extract::extract_secret;
use crate::registry::BoxedSecretsClient;
use crate::registry::Provider;
use crate::registry::SharedSecretLookup;
use crate::request::RenderedRequest;
use crate::request::execute;
use crate::settings::HttpSettings;
use crate::template::TemplateRenderer;
use crate::trust::build_http_client;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Provider kind for webhook stores.
pub const WEBHOOK_PROVIDER_KIND: &str = "webhook";

// ============================================================================
// SECTION: Client
// ============================================================================

/// Webhook secrets client bound to a store and namespace.
///
/// # Invariants
/// - The store configuration is immutable for the client's lifetime.
/// - Calls share no mutable state and may run concurrently.
pub struct WebhookClient {
    /// Store configuration.
    store: StoreSpec,
    /// Namespace resolution scope.
    scope: ClientScope,
    /// Host secret lookup.
    lookup: SharedSecretLookup,
    /// Template renderer.
    renderer: Arc<TemplateRenderer>,
    /// HTTP settings.
    settings: HttpSettings,
}

impl WebhookClient {
    /// Creates a client for `store` operating in `namespace`.
    #[must_use]
    pub fn new(
        store: StoreSpec,
        lookup: SharedSecretLookup,
        namespace: &str,
        renderer: Arc<TemplateRenderer>,
        settings: HttpSettings,
    ) -> Self {
        let scope = ClientScope::new(store.kind, namespace);
        Self {
            store,
            scope,
            lookup,
            renderer,
            settings,
        }
    }

    /// Runs the fetch pipeline for one reference.
    fn fetch(&self, remote_ref: &RemoteRef) -> Result<Vec<u8>, SecretsError> {
        let provider = self.store.webhook_provider()?;
        let lookup = self.lookup.as_ref();
        let context = build_context(remote_ref, &provider.secrets, &self.scope, lookup)?;

        let url = self.renderer.render_string(TemplateField::Url, &provider.url, &context)?;
        let body = self.renderer.render(TemplateField::Body, &provider.body, &context)?;
        let mut request = RenderedRequest::new(provider.effective_method(), &url, body)?;
        for (name, template) in &provider.headers {
            let value =
                self.renderer.render_string(TemplateField::Header(name.clone()), template, &context)?;
            request.add_header(name, &value)?;
        }

        let client = build_http_client(provider, &self.settings, &self.scope, lookup)?;
        let response = execute(&client, request, self.settings.max_response_bytes)?;
        extract_secret(response.body, &provider.result.json_path)
    }
}

impl SecretsClient for WebhookClient {
    fn get_secret(&self, remote_ref: &RemoteRef) -> Result<Vec<u8>, SecretsError> {
        debug!(store = %self.store.name, "fetching webhook secret");
        self.fetch(remote_ref).inspect_err(|err| {
            warn!(store = %self.store.name, kind = err.kind(), "webhook secret fetch failed");
        })
    }

    fn get_secret_map(
        &self,
        _remote_ref: &RemoteRef,
    ) -> Result<BTreeMap<String, Vec<u8>>, SecretsError> {
        Err(SecretsError::NotImplemented("GetSecretMap"))
    }

    fn close(&self) -> Result<(), SecretsError> {
        Ok(())
    }
}

// ============================================================================
// SECTION: Provider
// ============================================================================

/// Provider constructing [`WebhookClient`] values.
#[derive(Debug, Clone, Default)]
pub struct WebhookProvider {
    /// Renderer shared by every client.
    renderer: Arc<TemplateRenderer>,
    /// HTTP settings applied to every client.
    settings: HttpSettings,
}

impl WebhookProvider {
    /// Creates a provider with the default renderer.
    #[must_use]
    pub fn new(settings: HttpSettings) -> Self {
        Self::with_renderer(settings, Arc::new(TemplateRenderer::new()))
    }

    /// Creates a provider with a caller-configured renderer.
    #[must_use]
    pub const fn with_renderer(settings: HttpSettings, renderer: Arc<TemplateRenderer>) -> Self {
        Self {
            renderer,
            settings,
        }
    }
}

impl Provider for WebhookProvider {
    fn new_client(
        &self,
        store: &StoreSpec,
        lookup: SharedSecretLookup,
        namespace: &str,
    ) -> Result<BoxedSecretsClient, SecretsError> {
        Ok(Box::new(WebhookClient::new(
            store.clone(),
            lookup,
            namespace,
            Arc::clone(&self.renderer),
            self.settings.clone(),
        )))
    }
}
