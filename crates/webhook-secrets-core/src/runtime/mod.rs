// crates/webhook-secrets-core/src/runtime/mod.rs
// ============================================================================
// Module: Webhook Secrets Runtime Helpers
// Description: In-process implementations of core interfaces.
// Purpose: Support embedding and tests without an external store.
// Dependencies: crate::interfaces
// ============================================================================

//! ## Overview
//! Runtime helpers provide reference implementations of the collaborator
//! interfaces for hosts that keep secret material in memory.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod lookup;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use lookup::InMemorySecretLookup;
