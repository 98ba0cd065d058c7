// crates/webhook-secrets-core/src/interfaces/mod.rs
// ============================================================================
// Module: Webhook Secrets Interfaces
// Description: Collaborator and client contracts plus the shared error taxonomy.
// Purpose: Define how hosts supply secret material and consume secret clients.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The host framework implements [`SecretLookup`] to expose its key/value
//! secret and config stores. Providers return implementations of
//! [`SecretsClient`]. Every failure along the fetch pipeline is reported as a
//! [`SecretsError`] variant; none of them are retried internally.
//!
//! Security posture: error messages carry names, keys, and status lines but
//! never secret values or rendered templates.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::core::JsonKind;
use crate::core::ObjectKey;
use crate::core::RemoteRef;

// ============================================================================
// SECTION: Secret Lookup
// ============================================================================

/// Errors reported by a [`SecretLookup`] implementation.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The referenced object does not exist.
    #[error("{0} not found")]
    NotFound(ObjectKey),
    /// The object exists but lacks the requested key.
    #[error("key {key} not found in {object}")]
    MissingKey {
        /// Object that was read.
        object: ObjectKey,
        /// Missing key.
        key: String,
    },
    /// The backing store failed.
    #[error("lookup backend error: {0}")]
    Backend(String),
}

/// Host capability for reading key/value secret and config objects.
pub trait SecretLookup {
    /// Returns every key/value pair of a secret object.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the secret cannot be read.
    fn get_keyed_secret(&self, key: &ObjectKey) -> Result<BTreeMap<String, Vec<u8>>, LookupError>;

    /// Returns every key/value pair of a plain config object.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the config object cannot be read.
    fn get_keyed_config(&self, key: &ObjectKey) -> Result<BTreeMap<String, String>, LookupError>;
}

// ============================================================================
// SECTION: Secrets Client
// ============================================================================

/// Client returned by a provider for one store and namespace.
pub trait SecretsClient {
    /// Fetches a single secret value.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsError`] when any pipeline stage fails.
    fn get_secret(&self, remote_ref: &RemoteRef) -> Result<Vec<u8>, SecretsError>;

    /// Fetches every key of a secret.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsError`] when the provider cannot serve secret maps.
    fn get_secret_map(
        &self,
        remote_ref: &RemoteRef,
    ) -> Result<BTreeMap<String, Vec<u8>>, SecretsError>;

    /// Releases client resources.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsError`] when releasing resources fails.
    fn close(&self) -> Result<(), SecretsError>;
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Template field being rendered when a template error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateField {
    /// URL template.
    Url,
    /// Body template.
    Body,
    /// Header value template, by header name.
    Header(String),
}

impl fmt::Display for TemplateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url => f.write_str("url"),
            Self::Body => f.write_str("body"),
            Self::Header(name) => write!(f, "header {name}"),
        }
    }
}

/// Secret fetch errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Every variant is terminal for the invocation that produced it.
#[derive(Debug, Error)]
pub enum SecretsError {
    /// The store has no webhook provider configured.
    #[error("missing store provider webhook: {store}")]
    MissingProviderConfig {
        /// Store name.
        store: String,
    },
    /// A cluster-scoped store reference omits its namespace.
    #[error("no namespace on cluster-scoped store reference {reference}")]
    MissingNamespace {
        /// Name of the reference lacking a namespace.
        reference: String,
    },
    /// An external secret or config lookup failed.
    #[error("failed to get {purpose} {name}: {source}")]
    SecretLookupFailed {
        /// What the lookup was for (binding or ca provider).
        purpose: &'static str,
        /// Reference name.
        name: String,
        /// Underlying lookup failure.
        #[source]
        source: LookupError,
    },
    /// A URL, body, or header template failed to parse or render.
    #[error("failed to parse {field}: {message}")]
    Template {
        /// Field being rendered.
        field: TemplateField,
        /// Renderer diagnostic.
        message: String,
    },
    /// CA PEM data yielded no certificates.
    #[error("failed to append ca bundle from {origin}")]
    InvalidCaBundle {
        /// Source of the CA data.
        origin: String,
    },
    /// CA provider kind is neither `Secret` nor `ConfigMap`.
    #[error("unknown ca provider type: {0}")]
    UnknownCaProviderType(String),
    /// The outbound request could not be constructed.
    #[error("failed to build request: {0}")]
    RequestBuildFailed(String),
    /// The outbound request failed in transport.
    #[error("failed to call endpoint: {0}")]
    RequestFailed(String),
    /// The endpoint answered with a non-2xx status.
    #[error("endpoint gave error {status}")]
    RemoteError {
        /// Status line, for example `404 Not Found`.
        status: String,
    },
    /// The response body could not be read.
    #[error("failed to read response: {0}")]
    ResponseReadError(String),
    /// The response body is not valid JSON.
    #[error("failed to parse response json: {0}")]
    InvalidJson(String),
    /// The path expression did not resolve.
    #[error("failed to get response path {path}: {message}")]
    PathNotFound {
        /// Configured path expression.
        path: String,
        /// Evaluation diagnostic.
        message: String,
    },
    /// The path resolved to something other than a single string.
    #[error("failed to get response (wrong type): expected string, found {found}")]
    UnexpectedResultType {
        /// Kind that was found.
        found: JsonKind,
    },
    /// The operation is not supported by this provider.
    #[error("{0} not implemented")]
    NotImplemented(&'static str),
    /// No provider is registered for the store kind.
    #[error("provider not registered: {0}")]
    ProviderNotRegistered(String),
    /// A provider is already registered for the store kind.
    #[error("provider already registered: {0}")]
    ProviderAlreadyRegistered(String),
}

impl SecretsError {
    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingProviderConfig {
                ..
            } => "missing_provider_config",
            Self::MissingNamespace {
                ..
            } => "missing_namespace",
            Self::SecretLookupFailed {
                ..
            } => "secret_lookup_failed",
            Self::Template {
                ..
            } => "template_error",
            Self::InvalidCaBundle {
                ..
            } => "invalid_ca_bundle",
            Self::UnknownCaProviderType(_) => "unknown_ca_provider_type",
            Self::RequestBuildFailed(_) => "request_build_failed",
            Self::RequestFailed(_) => "request_failed",
            Self::RemoteError {
                ..
            } => "remote_error",
            Self::ResponseReadError(_) => "response_read_error",
            Self::InvalidJson(_) => "invalid_json",
            Self::PathNotFound {
                ..
            } => "path_not_found",
            Self::UnexpectedResultType {
                ..
            } => "unexpected_result_type",
            Self::NotImplemented(_) => "not_implemented",
            Self::ProviderNotRegistered(_) => "provider_not_registered",
            Self::ProviderAlreadyRegistered(_) => "provider_already_registered",
        }
    }
}
