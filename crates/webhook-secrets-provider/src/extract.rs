// crates/webhook-secrets-provider/src/extract.rs
// ============================================================================
// Module: Response Extraction
// Description: Selects the secret value from a webhook response body.
// Purpose: Apply the configured JSONPath and enforce a string result.
// Dependencies: webhook-secrets-core, jsonpath_lib, serde_json
// ============================================================================

//! Secret extraction from raw response bodies.
//!
//! An empty path returns the body unchanged. Otherwise the body must be JSON
//! and the path must select exactly one string.

use jsonpath_lib::select;
use serde_json::Value;
use webhook_secrets_core::JsonKind;
use webhook_secrets_core::SecretsError;

/// Extracts the secret value from a response body.
///
/// # Errors
///
/// Returns [`SecretsError::InvalidJson`] when a path is set and the body is not
/// JSON, [`SecretsError::PathNotFound`] when the path is invalid or matches
/// nothing, and [`SecretsError::UnexpectedResultType`] when the selection is
/// not a single string.
pub fn extract_secret(body: Vec<u8>, json_path: &str) -> Result<Vec<u8>, SecretsError> {
    if json_path.is_empty() {
        return Ok(body);
    }
    let document: Value =
        serde_json::from_slice(&body).map_err(|err| SecretsError::InvalidJson(err.to_string()))?;
    let path_error = |message: &str| SecretsError::PathNotFound {
        path: json_path.to_string(),
        message: message.to_string(),
    };
    let matches = select(&document, json_path).map_err(|_| path_error("invalid jsonpath"))?;
    match matches.as_slice() {
        [] => Err(path_error("no match")),
        [Value::String(secret)] => Ok(secret.as_bytes().to_vec()),
        [single] => Err(SecretsError::UnexpectedResultType {
            found: JsonKind::of(single),
        }),
        _ => Err(SecretsError::UnexpectedResultType {
            found: JsonKind::Array,
        }),
    }
}
