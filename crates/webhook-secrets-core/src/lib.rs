// crates/webhook-secrets-core/src/lib.rs
// ============================================================================
// Module: Webhook Secrets Core Library
// Description: Public API surface for the webhook secrets core.
// Purpose: Expose store model types, collaborator interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Webhook secrets core defines the configuration model for webhook-backed
//! secret stores, the error taxonomy shared by every fetch stage, and the
//! interfaces through which a host framework supplies key/value secret
//! material. It performs no I/O itself.
//!
//! Security posture: store configuration and remote responses are untrusted;
//! secret values must never appear in error messages or logs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::LookupError;
pub use interfaces::SecretLookup;
pub use interfaces::SecretsClient;
pub use interfaces::SecretsError;
pub use interfaces::TemplateField;
pub use runtime::InMemorySecretLookup;
