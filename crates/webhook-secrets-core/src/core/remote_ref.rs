// crates/webhook-secrets-core/src/core/remote_ref.rs
// ============================================================================
// Module: Remote Secret Reference
// Description: Abstract reference to a secret held by a remote endpoint.
// Purpose: Carry the caller's key, version, and property into templates.
// Dependencies: serde
// ============================================================================

//! Remote secret references passed to [`crate::SecretsClient`].

use serde::Deserialize;
use serde::Serialize;

/// Reference to a secret served by a webhook endpoint.
///
/// # Invariants
/// - `key` is the only required field; templates always see it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRef {
    /// Key identifying the secret at the remote endpoint.
    pub key: String,
    /// Optional secret version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Optional property within the secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

impl RemoteRef {
    /// Creates a reference with only a key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            version: None,
            property: None,
        }
    }

    /// Sets the secret version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the secret property.
    #[must_use]
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }
}
