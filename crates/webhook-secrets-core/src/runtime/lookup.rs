// crates/webhook-secrets-core/src/runtime/lookup.rs
// ============================================================================
// Module: In-Memory Secret Lookup
// Description: Mutex-backed secret and config store.
// Purpose: Serve keyed secret material without an external backend.
// Dependencies: crate::interfaces
// ============================================================================

//! ## Overview
//! [`InMemorySecretLookup`] keeps secret and config objects keyed by
//! [`ObjectKey`]. Clones share the same underlying maps.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::ObjectKey;
use crate::interfaces::LookupError;
use crate::interfaces::SecretLookup;

// ============================================================================
// SECTION: In-Memory Lookup
// ============================================================================

/// Secret objects keyed by location.
type SecretObjects = BTreeMap<ObjectKey, BTreeMap<String, Vec<u8>>>;
/// Config objects keyed by location.
type ConfigObjects = BTreeMap<ObjectKey, BTreeMap<String, String>>;

/// In-memory secret and config store for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemorySecretLookup {
    /// Secret objects protected by a mutex.
    secrets: Arc<Mutex<SecretObjects>>,
    /// Config objects protected by a mutex.
    configs: Arc<Mutex<ConfigObjects>>,
}

impl InMemorySecretLookup {
    /// Creates an empty lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a secret object, replacing any previous object at the same key.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Backend`] when the store mutex is poisoned.
    pub fn insert_secret<I, K, V>(&self, key: ObjectKey, data: I) -> Result<(), LookupError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        let data = data.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self.secrets
            .lock()
            .map_err(|_| LookupError::Backend("secret store mutex poisoned".to_string()))?
            .insert(key, data);
        Ok(())
    }

    /// Stores a config object, replacing any previous object at the same key.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Backend`] when the store mutex is poisoned.
    pub fn insert_config<I, K, V>(&self, key: ObjectKey, data: I) -> Result<(), LookupError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let data = data.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self.configs
            .lock()
            .map_err(|_| LookupError::Backend("config store mutex poisoned".to_string()))?
            .insert(key, data);
        Ok(())
    }
}

impl SecretLookup for InMemorySecretLookup {
    fn get_keyed_secret(&self, key: &ObjectKey) -> Result<BTreeMap<String, Vec<u8>>, LookupError> {
        let guard = self
            .secrets
            .lock()
            .map_err(|_| LookupError::Backend("secret store mutex poisoned".to_string()))?;
        guard.get(key).cloned().ok_or_else(|| LookupError::NotFound(key.clone()))
    }

    fn get_keyed_config(&self, key: &ObjectKey) -> Result<BTreeMap<String, String>, LookupError> {
        let guard = self
            .configs
            .lock()
            .map_err(|_| LookupError::Backend("config store mutex poisoned".to_string()))?;
        guard.get(key).cloned().ok_or_else(|| LookupError::NotFound(key.clone()))
    }
}
