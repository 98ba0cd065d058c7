// crates/webhook-secrets-provider/src/template.rs
// ============================================================================
// Module: Template Renderer
// Description: Renders URL, body, and header templates against a context.
// Purpose: Provide pure rendering with an extended helper library.
// Dependencies: minijinja, base64, sha2, url
// ============================================================================

//! ## Overview
//! [`TemplateRenderer`] wraps a `minijinja` environment configured for plain
//! text output. Printing an undefined value is an error, while `default`
//! filters and `is defined` tests still work on missing fields. Templates are
//! rendered from source on every call so configuration changes need no cache
//! invalidation.
//!
//! Helpers registered on top of the builtin filters:
//! `b64enc`, `b64dec`, `sha256sum`, `sha512sum`, `snakecase`, `camelcase`,
//! `kebabcase`, `trimprefix`, `trimsuffix`, `quote`, `squote`, `urlquery`,
//! `nospace`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use minijinja::AutoEscape;
use minijinja::Environment;
use minijinja::Error;
use minijinja::ErrorKind;
use minijinja::UndefinedBehavior;
use sha2::Digest;
use sha2::Sha256;
use sha2::Sha512;
use webhook_secrets_core::SecretsError;
use webhook_secrets_core::TemplateField;

use crate::context::TemplateContext;
use crate::context::query_escape;

// ============================================================================
// SECTION: Renderer
// ============================================================================

/// Text template renderer for webhook requests.
///
/// # Invariants
/// - Rendering has no side effects; equal inputs yield equal output.
/// - Output is never HTML-escaped.
#[derive(Debug)]
pub struct TemplateRenderer {
    /// Configured template environment.
    env: Environment<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Creates a renderer with the builtin and extended helper library.
    #[must_use]
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::SemiStrict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        register_helpers(&mut env);
        Self {
            env,
        }
    }

    /// Returns the environment so hosts can register additional helpers.
    pub const fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }

    /// Renders a template into bytes.
    ///
    /// Empty templates render to an empty buffer without invoking the engine.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsError::Template`] tagged with `field` when parsing or
    /// rendering fails.
    pub fn render(
        &self,
        field: TemplateField,
        template: &str,
        context: &TemplateContext,
    ) -> Result<Vec<u8>, SecretsError> {
        self.render_string(field, template, context).map(String::into_bytes)
    }

    /// Renders a template into a string.
    ///
    /// # Errors
    ///
    /// Returns [`SecretsError::Template`] tagged with `field` when parsing or
    /// rendering fails.
    pub fn render_string(
        &self,
        field: TemplateField,
        template: &str,
        context: &TemplateContext,
    ) -> Result<String, SecretsError> {
        if template.is_empty() {
            return Ok(String::new());
        }
        let name = field.to_string();
        self.env.render_named_str(&name, template, context).map_err(|err| {
            SecretsError::Template {
                field,
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// SECTION: Helper Library
// ============================================================================

/// Registers the extended helper filters.
fn register_helpers(env: &mut Environment<'static>) {
    env.add_filter("b64enc", b64enc);
    env.add_filter("b64dec", b64dec);
    env.add_filter("sha256sum", sha256sum);
    env.add_filter("sha512sum", sha512sum);
    env.add_filter("snakecase", snakecase);
    env.add_filter("camelcase", camelcase);
    env.add_filter("kebabcase", kebabcase);
    env.add_filter("trimprefix", trimprefix);
    env.add_filter("trimsuffix", trimsuffix);
    env.add_filter("quote", quote);
    env.add_filter("squote", squote);
    env.add_filter("urlquery", urlquery);
    env.add_filter("nospace", nospace);
}

/// Encodes a string as standard base64.
fn b64enc(value: String) -> String {
    STANDARD.encode(value.as_bytes())
}

/// Decodes standard base64 into a UTF-8 string.
fn b64dec(value: String) -> Result<String, Error> {
    let bytes = STANDARD
        .decode(value.trim().as_bytes())
        .map_err(|err| Error::new(ErrorKind::InvalidOperation, format!("b64dec: {err}")))?;
    String::from_utf8(bytes).map_err(|_| {
        Error::new(ErrorKind::InvalidOperation, "b64dec: decoded value is not utf-8")
    })
}

/// Returns the lowercase hex SHA-256 digest of a string.
fn sha256sum(value: String) -> String {
    hex_encode(&Sha256::digest(value.as_bytes()))
}

/// Returns the lowercase hex SHA-512 digest of a string.
fn sha512sum(value: String) -> String {
    hex_encode(&Sha512::digest(value.as_bytes()))
}

/// Converts a string to `snake_case`.
fn snakecase(value: String) -> String {
    split_words(&value).iter().map(|word| word.to_lowercase()).collect::<Vec<_>>().join("_")
}

/// Converts a string to `kebab-case`.
fn kebabcase(value: String) -> String {
    split_words(&value).iter().map(|word| word.to_lowercase()).collect::<Vec<_>>().join("-")
}

/// Converts a string to `CamelCase` with a leading capital.
fn camelcase(value: String) -> String {
    split_words(&value).iter().map(|word| capitalize(word)).collect()
}

/// Strips a prefix when present.
fn trimprefix(value: String, prefix: String) -> String {
    value.strip_prefix(prefix.as_str()).map(str::to_string).unwrap_or(value)
}

/// Strips a suffix when present.
fn trimsuffix(value: String, suffix: String) -> String {
    value.strip_suffix(suffix.as_str()).map(str::to_string).unwrap_or(value)
}

/// Wraps a string in double quotes, escaping quotes and backslashes.
fn quote(value: String) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Wraps a string in single quotes.
fn squote(value: String) -> String {
    format!("'{value}'")
}

/// Query-escapes a string with form encoding.
fn urlquery(value: String) -> String {
    query_escape(&value)
}

/// Removes all whitespace.
fn nospace(value: String) -> String {
    value.chars().filter(|ch| !ch.is_whitespace()).collect()
}

/// Splits identifiers on separators and lower-to-upper case boundaries.
fn split_words(value: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for ch in value.chars() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_numeric();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Uppercases the first character and lowercases the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================
