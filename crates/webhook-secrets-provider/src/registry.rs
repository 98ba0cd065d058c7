// crates/webhook-secrets-provider/src/registry.rs
// ============================================================================
// Module: Provider Registry
// Description: Explicit registry mapping provider kinds to client factories.
// Purpose: Construct secret clients for stores without global state.
// Dependencies: webhook-secrets-core
// ============================================================================

//! ## Overview
//! Providers are registered by kind on a [`ProviderRegistry`] value owned by
//! the host. There is no process-wide registration; hosts build a registry
//! at startup and pass it where clients are created.
//! Invariants:
//! - Each provider kind is registered at most once.
//! - Unknown provider kinds fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use webhook_secrets_core::SecretLookup;
use webhook_secrets_core::SecretsClient;
use webhook_secrets_core::SecretsError;
use webhook_secrets_core::StoreSpec;

use crate::client::WEBHOOK_PROVIDER_KIND;
use crate::client::WebhookProvider;
use crate::settings::HttpSettings;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Shared handle to the host's secret lookup.
pub type SharedSecretLookup = Arc<dyn SecretLookup + Send + Sync>;

/// Boxed secrets client returned by providers.
pub type BoxedSecretsClient = Box<dyn SecretsClient + Send + Sync>;

/// Factory for secrets clients bound to a store.
pub trait Provider {
    /// Creates a client for `store` operating in `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsError`] when the client cannot be constructed.
    fn new_client(
        &self,
        store: &StoreSpec,
        lookup: SharedSecretLookup,
        namespace: &str,
    ) -> Result<BoxedSecretsClient, SecretsError>;
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Registry of providers keyed by kind.
#[derive(Default)]
pub struct ProviderRegistry {
    /// Registered providers.
    providers: BTreeMap<String, Box<dyn Provider + Send + Sync>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in webhook provider registered.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsError::ProviderAlreadyRegistered`] if registration
    /// collides, which cannot happen on a fresh registry.
    pub fn with_builtin_providers(settings: HttpSettings) -> Result<Self, SecretsError> {
        let mut registry = Self::new();
        registry.register_provider(WEBHOOK_PROVIDER_KIND, WebhookProvider::new(settings))?;
        Ok(registry)
    }

    /// Registers a provider under `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsError::ProviderAlreadyRegistered`] when `kind` is
    /// already registered.
    pub fn register_provider<P>(&mut self, kind: impl Into<String>, provider: P) -> Result<(), SecretsError>
    where
        P: Provider + Send + Sync + 'static,
    {
        let kind = kind.into();
        if self.providers.contains_key(&kind) {
            return Err(SecretsError::ProviderAlreadyRegistered(kind));
        }
        self.providers.insert(kind, Box::new(provider));
        Ok(())
    }

    /// Creates a client through the provider registered under `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsError::ProviderNotRegistered`] for unknown kinds and
    /// propagates provider construction errors.
    pub fn new_client(
        &self,
        kind: &str,
        store: &StoreSpec,
        lookup: SharedSecretLookup,
        namespace: &str,
    ) -> Result<BoxedSecretsClient, SecretsError> {
        let provider = self
            .providers
            .get(kind)
            .ok_or_else(|| SecretsError::ProviderNotRegistered(kind.to_string()))?;
        provider.new_client(store, lookup, namespace)
    }

    /// Returns the registered provider kinds in sorted order.
    #[must_use]
    pub fn kinds(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }
}
