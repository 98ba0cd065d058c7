// crates/webhook-secrets-core/src/core/json.rs
// ============================================================================
// Module: JSON Value Kinds
// Description: Stable labels for decoded JSON value variants.
// Purpose: Report which variant a path expression resolved to.
// Dependencies: serde_json
// ============================================================================

//! JSON value classification used when a path resolves to a non-string.

use std::fmt;

use serde_json::Value;

/// Variant of a decoded JSON value.
///
/// # Invariants
/// - Variants are stable for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool,
    /// JSON number.
    Number,
    /// JSON string.
    String,
    /// JSON array, or several values matched by one path.
    Array,
    /// JSON object.
    Object,
}

impl JsonKind {
    /// Classifies a decoded JSON value.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns a stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
