// crates/webhook-secrets-core/src/core/webhook.rs
// ============================================================================
// Module: Webhook Provider Configuration
// Description: Templated request, extraction, and trust configuration.
// Purpose: Describe how a webhook store builds requests and reads responses.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`WebhookProviderConfig`] holds the templates used to render the outbound
//! request, the path used to extract the secret from the response, the secret
//! bindings that feed the template context, and optional CA trust material.
//! Templates are stored as raw text and rendered per request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// HTTP method used when the configuration leaves it empty.
pub const DEFAULT_METHOD: &str = "GET";

// ============================================================================
// SECTION: Provider Configuration
// ============================================================================

/// Webhook provider configuration.
///
/// # Invariants
/// - `url`, `body`, and header values are template text, not rendered values.
/// - An empty `method` means [`DEFAULT_METHOD`].
/// - An empty `result.json_path` returns the response body verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookProviderConfig {
    /// HTTP method; empty selects `GET`.
    #[serde(default)]
    pub method: String,
    /// URL template.
    pub url: String,
    /// Header name to value template map.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Body template; empty sends no body.
    #[serde(default)]
    pub body: String,
    /// Response extraction settings.
    #[serde(default)]
    pub result: WebhookResult,
    /// Secrets exposed to templates by logical name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secrets: Vec<SecretBinding>,
    /// Inline PEM-encoded CA bundle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_bundle: Option<String>,
    /// CA certificate fetched from an external store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_provider: Option<CaProvider>,
}

impl WebhookProviderConfig {
    /// Returns the effective HTTP method.
    #[must_use]
    pub fn effective_method(&self) -> &str {
        let method = self.method.trim();
        if method.is_empty() { DEFAULT_METHOD } else { method }
    }

    /// Returns true when the client needs a custom trust pool.
    #[must_use]
    pub fn has_custom_trust(&self) -> bool {
        self.ca_bundle.as_deref().is_some_and(|bundle| !bundle.is_empty())
            || self.ca_provider.is_some()
    }
}

/// Response extraction settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResult {
    /// `JSONPath` of the secret value; empty returns the raw body.
    #[serde(default)]
    pub json_path: String,
}

// ============================================================================
// SECTION: Secret References
// ============================================================================

/// Reference to a key inside an external key/value secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKeySelector {
    /// Secret name.
    pub name: String,
    /// Key inside the secret.
    #[serde(default)]
    pub key: String,
    /// Namespace; required for cluster-scoped stores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Named secret whose key/value pairs are exposed to templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretBinding {
    /// Group name used in templates.
    pub name: String,
    /// Referenced secret.
    pub secret_ref: SecretKeySelector,
}

// ============================================================================
// SECTION: CA Provider
// ============================================================================

/// Kind of store holding CA material.
///
/// Unrecognized kinds deserialize into [`CaProviderKind::Unknown`] so that the
/// trust resolver can reject them with the original label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CaProviderKind {
    /// Key/value secret store.
    Secret,
    /// Plain key/value config store.
    ConfigMap,
    /// Unsupported kind label.
    Unknown(String),
}

impl CaProviderKind {
    /// Returns the kind label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Secret => "Secret",
            Self::ConfigMap => "ConfigMap",
            Self::Unknown(label) => label.as_str(),
        }
    }
}

impl From<String> for CaProviderKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Secret" => Self::Secret,
            "ConfigMap" => Self::ConfigMap,
            _ => Self::Unknown(value),
        }
    }
}

impl From<CaProviderKind> for String {
    fn from(value: CaProviderKind) -> Self {
        match value {
            CaProviderKind::Unknown(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CaProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a PEM CA certificate held in an external store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaProvider {
    /// Store kind holding the certificate.
    #[serde(rename = "type")]
    pub kind: CaProviderKind,
    /// Object name.
    pub name: String,
    /// Key holding the PEM data.
    pub key: String,
    /// Namespace; required for cluster-scoped stores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}
