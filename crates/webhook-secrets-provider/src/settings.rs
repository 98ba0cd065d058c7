// crates/webhook-secrets-provider/src/settings.rs
// ============================================================================
// Module: HTTP Client Settings
// Description: Timeout, size, and identity settings for outbound requests.
// Purpose: Bound webhook calls independently of store configuration.
// Dependencies: serde
// ============================================================================

//! Settings applied to every HTTP client built for webhook fetches.

use serde::Deserialize;
use serde::Serialize;

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Default response size limit in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 10 * 1024 * 1024;
/// Default user agent for outbound requests.
pub const DEFAULT_USER_AGENT: &str = "webhook-secrets/0.1";

/// HTTP client settings for webhook fetches.
///
/// # Invariants
/// - `timeout_ms` applies to the full request lifecycle.
/// - `max_response_bytes` is a hard upper bound on response bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
