// crates/webhook-secrets-provider/src/context.rs
// ============================================================================
// Module: Secret Context Builder
// Description: Assembles template data from the remote ref and secret bindings.
// Purpose: Provide the grouped key/value context consumed by templates.
// Dependencies: webhook-secrets-core, serde, url
// ============================================================================

//! ## Overview
//! A [`TemplateContext`] maps group names to key/value string maps. The
//! `remoteRef` group always carries the query-escaped requested key; each
//! secret binding contributes one group holding every pair of the referenced
//! secret.
//! Invariants:
//! - Contexts are built fresh per request and never cached.
//! - Any lookup failure aborts the build; partial contexts are discarded.
//! - Debug output lists group and key names only, never values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use url::form_urlencoded::byte_serialize;
use webhook_secrets_core::ClientScope;
use webhook_secrets_core::RemoteRef;
use webhook_secrets_core::SecretBinding;
use webhook_secrets_core::SecretLookup;
use webhook_secrets_core::SecretsError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Context group holding the caller's remote reference.
pub const REMOTE_REF_GROUP: &str = "remoteRef";

// ============================================================================
// SECTION: Template Context
// ============================================================================

/// Grouped key/value data available to templates.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplateContext(BTreeMap<String, BTreeMap<String, String>>);

impl TemplateContext {
    /// Creates a context holding only the `remoteRef` group.
    ///
    /// `key` is always present; `version` and `property` are added when set.
    /// Every value is query-escaped.
    #[must_use]
    pub fn for_remote_ref(remote_ref: &RemoteRef) -> Self {
        let mut group = BTreeMap::new();
        group.insert("key".to_string(), query_escape(&remote_ref.key));
        if let Some(version) = &remote_ref.version {
            group.insert("version".to_string(), query_escape(version));
        }
        if let Some(property) = &remote_ref.property {
            group.insert("property".to_string(), query_escape(property));
        }
        let mut groups = BTreeMap::new();
        groups.insert(REMOTE_REF_GROUP.to_string(), group);
        Self(groups)
    }

    /// Returns a group by name.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&BTreeMap<String, String>> {
        self.0.get(name)
    }

    /// Returns a single value by group and key.
    #[must_use]
    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        self.0.get(group).and_then(|values| values.get(key)).map(String::as_str)
    }

    /// Merges pairs into a group; later keys overwrite earlier ones.
    pub fn merge_group<I>(&mut self, name: &str, pairs: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.0.entry(name.to_string()).or_default().extend(pairs);
    }
}

impl fmt::Debug for TemplateContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(name, values)| (name, values.keys().collect::<Vec<_>>())))
            .finish()
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builds the template context for one request.
///
/// # Errors
///
/// Returns [`SecretsError::MissingNamespace`] when a cluster-scoped store
/// binding omits its namespace, and [`SecretsError::SecretLookupFailed`] when a
/// referenced secret cannot be read.
pub fn build_context(
    remote_ref: &RemoteRef,
    bindings: &[SecretBinding],
    scope: &ClientScope,
    lookup: &dyn SecretLookup,
) -> Result<TemplateContext, SecretsError> {
    let mut context = TemplateContext::for_remote_ref(remote_ref);
    for binding in bindings {
        let secret_ref = &binding.secret_ref;
        let object = scope.resolve(&secret_ref.name, secret_ref.namespace.as_deref())?;
        let data = lookup.get_keyed_secret(&object).map_err(|source| {
            SecretsError::SecretLookupFailed {
                purpose: "webhook secret",
                name: secret_ref.name.clone(),
                source,
            }
        })?;
        context.merge_group(
            &binding.name,
            data.into_iter().map(|(key, value)| (key, String::from_utf8_lossy(&value).into_owned())),
        );
    }
    Ok(context)
}

/// Query-escapes a value using form encoding (spaces become `+`).
#[must_use]
pub fn query_escape(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
