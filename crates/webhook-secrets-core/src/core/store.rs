// crates/webhook-secrets-core/src/core/store.rs
// ============================================================================
// Module: Store Scope
// Description: Store identity, scope rules, and object keys.
// Purpose: Decide which namespace a secret or config reference resolves in.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A store is either namespaced ([`StoreKind::SecretStore`]) or cluster-scoped
//! ([`StoreKind::ClusterSecretStore`]). [`ClientScope`] pairs the store kind
//! with the namespace the client was created for and applies the namespace
//! rule to every reference the pipeline resolves.
//! Invariants:
//! - Cluster-scoped stores never fall back to the client namespace.
//! - Namespaced stores only read from their own namespace.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::webhook::WebhookProviderConfig;
use crate::interfaces::SecretsError;

// ============================================================================
// SECTION: Store Kind
// ============================================================================

/// Store identity controlling namespace resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreKind {
    /// Namespaced store; references resolve in the store's own namespace.
    #[default]
    SecretStore,
    /// Cluster-scoped store; references must carry an explicit namespace.
    ClusterSecretStore,
}

impl StoreKind {
    /// Returns a stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SecretStore => "SecretStore",
            Self::ClusterSecretStore => "ClusterSecretStore",
        }
    }

    /// Returns true for cluster-scoped stores.
    #[must_use]
    pub const fn is_cluster_scoped(self) -> bool {
        matches!(self, Self::ClusterSecretStore)
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Object Key
// ============================================================================

/// Fully resolved location of a key/value object in an external store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectKey {
    /// Namespace holding the object.
    pub namespace: String,
    /// Object name.
    pub name: String,
}

impl ObjectKey {
    /// Creates an object key.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

// ============================================================================
// SECTION: Client Scope
// ============================================================================

/// Store kind combined with the namespace a client operates in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientScope {
    /// Kind of the store that created the client.
    pub store_kind: StoreKind,
    /// Namespace the client was created for.
    pub namespace: String,
}

impl ClientScope {
    /// Creates a client scope.
    #[must_use]
    pub fn new(store_kind: StoreKind, namespace: impl Into<String>) -> Self {
        Self {
            store_kind,
            namespace: namespace.into(),
        }
    }

    /// Resolves the object key for a named reference.
    ///
    /// Cluster-scoped stores require `explicit_namespace`; namespaced stores
    /// ignore it and use their own namespace.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsError::MissingNamespace`] when a cluster-scoped store
    /// reference omits its namespace.
    pub fn resolve(
        &self,
        name: &str,
        explicit_namespace: Option<&str>,
    ) -> Result<ObjectKey, SecretsError> {
        if !self.store_kind.is_cluster_scoped() {
            return Ok(ObjectKey::new(self.namespace.clone(), name));
        }
        match explicit_namespace {
            Some(namespace) if !namespace.trim().is_empty() => Ok(ObjectKey::new(namespace, name)),
            _ => Err(SecretsError::MissingNamespace {
                reference: name.to_string(),
            }),
        }
    }
}

// ============================================================================
// SECTION: Store Spec
// ============================================================================

/// Store configuration consumed by the provider registry.
///
/// # Invariants
/// - `webhook` absent means the store has no webhook provider configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSpec {
    /// Store name, unique within a configuration.
    pub name: String,
    /// Store kind.
    #[serde(default)]
    pub kind: StoreKind,
    /// Webhook provider configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<WebhookProviderConfig>,
}

impl StoreSpec {
    /// Returns the webhook provider configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsError::MissingProviderConfig`] when no webhook is configured.
    pub fn webhook_provider(&self) -> Result<&WebhookProviderConfig, SecretsError> {
        self.webhook.as_ref().ok_or_else(|| SecretsError::MissingProviderConfig {
            store: self.name.clone(),
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
