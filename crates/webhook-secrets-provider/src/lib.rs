// crates/webhook-secrets-provider/src/lib.rs
// ============================================================================
// Module: Webhook Secrets Provider
// Description: Templated-request secret fetch client and provider registry.
// Purpose: Render, send, and extract webhook secret requests.
// Dependencies: webhook-secrets-core, minijinja, reqwest, jsonpath_lib, tracing
// ============================================================================

//! ## Overview
//! This crate implements the webhook secret provider. A fetch builds a
//! template context from the requested key and configured secret bindings,
//! renders the URL, body, and headers, resolves CA trust material, sends the
//! request, and extracts the secret from the response.
//! Invariants:
//! - Every stage fails closed; no partial context or response is returned.
//! - No state is shared between fetches beyond the immutable renderer.
//! - Providers are constructed through [`ProviderRegistry`] by explicit registration.
//!
//! Security posture: remote responses and store configuration are untrusted;
//! secret values are never logged.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod context;
pub mod extract;
pub mod registry;
pub mod request;
pub mod settings;
pub mod template;
pub mod trust;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::WEBHOOK_PROVIDER_KIND;
pub use client::WebhookClient;
pub use client::WebhookProvider;
pub use context::TemplateContext;
pub use context::build_context;
pub use extract::extract_secret;
pub use registry::BoxedSecretsClient;
pub use registry::Provider;
pub use registry::ProviderRegistry;
pub use registry::SharedSecretLookup;
pub use request::RemoteResponse;
pub use request::RenderedRequest;
pub use request::execute;
pub use settings::HttpSettings;
pub use template::TemplateRenderer;
pub use trust::build_http_client;
