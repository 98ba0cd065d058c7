// crates/webhook-secrets-config/src/config.rs
// ============================================================================
// Module: Webhook Secrets Configuration
// Description: Configuration loading and validation for webhook stores.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: webhook-secrets-core, webhook-secrets-provider, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Missing or invalid configuration fails closed.
//!
//! ```toml
//! [http]
//! timeout_ms = 5000
//!
//! [[stores]]
//! name = "vault"
//!
//! [stores.webhook]
//! url = "https://vault.example/api/getsecret?id={{ remoteRef.key }}"
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use reqwest::Method;
use reqwest::header::HeaderName;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use webhook_secrets_core::CaProvider;
use webhook_secrets_core::SecretBinding;
use webhook_secrets_core::StoreSpec;
use webhook_secrets_core::WebhookProviderConfig;
use webhook_secrets_provider::HttpSettings;
use webhook_secrets_provider::context::REMOTE_REF_GROUP;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "webhook-secrets.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "WEBHOOK_SECRETS_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// Top-level webhook secrets configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookSecretsConfig {
    /// HTTP client settings shared by all stores.
    #[serde(default)]
    pub http: HttpSettings,
    /// Configured stores.
    #[serde(default)]
    pub stores: Vec<StoreSpec>,
}

impl WebhookSecretsConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config = Self::from_toml(content)?;
        debug!(path = %resolved.display(), stores = config.stores.len(), "loaded webhook secrets config");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_http(&self.http)?;
        let mut names = BTreeSet::new();
        for store in &self.stores {
            let name = store.name.trim();
            if name.is_empty() {
                return Err(ConfigError::Invalid("store name must be non-empty".to_string()));
            }
            if !names.insert(name) {
                return Err(ConfigError::Invalid(format!("duplicate store name: {name}")));
            }
            if let Some(webhook) = &store.webhook {
                validate_webhook(name, webhook)?;
            }
        }
        Ok(())
    }

    /// Returns the store with the given name.
    #[must_use]
    pub fn store(&self, name: &str) -> Option<&StoreSpec> {
        self.stores.iter().find(|store| store.name == name)
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates HTTP client limits.
fn validate_http(http: &HttpSettings) -> Result<(), ConfigError> {
    if http.timeout_ms == 0 {
        return Err(ConfigError::Invalid("http.timeout_ms must be greater than zero".to_string()));
    }
    if http.max_response_bytes == 0 {
        return Err(ConfigError::Invalid(
            "http.max_response_bytes must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Validates one store's webhook configuration.
fn validate_webhook(store: &str, webhook: &WebhookProviderConfig) -> Result<(), ConfigError> {
    if webhook.url.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("store {store}: webhook url must be non-empty")));
    }
    let method = webhook.method.trim();
    if !method.is_empty() && Method::from_bytes(method.as_bytes()).is_err() {
        return Err(ConfigError::Invalid(format!("store {store}: invalid http method {method}")));
    }
    for name in webhook.headers.keys() {
        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            return Err(ConfigError::Invalid(format!("store {store}: invalid header name {name}")));
        }
    }
    for binding in &webhook.secrets {
        validate_binding(store, binding)?;
    }
    if let Some(ca_provider) = &webhook.ca_provider {
        validate_ca_provider(store, ca_provider)?;
    }
    Ok(())
}

/// Validates a secret binding.
fn validate_binding(store: &str, binding: &SecretBinding) -> Result<(), ConfigError> {
    let name = binding.name.trim();
    if name.is_empty() {
        return Err(ConfigError::Invalid(format!("store {store}: secret binding name must be non-empty")));
    }
    if name == REMOTE_REF_GROUP {
        return Err(ConfigError::Invalid(format!(
            "store {store}: secret binding name {REMOTE_REF_GROUP} is reserved"
        )));
    }
    if binding.secret_ref.name.trim().is_empty() {
        return Err(ConfigError::Invalid(format!(
            "store {store}: secret binding {name} must reference a named secret"
        )));
    }
    Ok(())
}

/// Validates a CA provider reference.
fn validate_ca_provider(store: &str, ca_provider: &CaProvider) -> Result<(), ConfigError> {
    if ca_provider.name.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("store {store}: ca_provider name must be non-empty")));
    }
    if ca_provider.key.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("store {store}: ca_provider key must be non-empty")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from an explicit path or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}
