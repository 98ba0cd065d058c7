// crates/webhook-secrets-config/src/lib.rs
// ============================================================================
// Module: Webhook Secrets Config Library
// Description: Store configuration model, loading, and validation.
// Purpose: Single source of truth for webhook-secrets.toml semantics.
// Dependencies: webhook-secrets-core, webhook-secrets-provider, serde, toml
// ============================================================================

//! ## Overview
//! `webhook-secrets-config` loads the TOML file describing HTTP settings and
//! webhook stores, and validates it before any client is built.
//!
//! Security posture: config inputs are untrusted and validated fail-closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
