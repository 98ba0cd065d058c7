// crates/webhook-secrets-core/src/core/mod.rs
// ============================================================================
// Module: Webhook Secrets Core Types
// Description: Store, provider, and reference types for webhook secret stores.
// Purpose: Group the serializable configuration model.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types describe what a webhook store fetches and from where. They are
//! loaded once per request cycle and never mutated by the fetch pipeline.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod json;
pub mod remote_ref;
pub mod store;
pub mod webhook;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use json::JsonKind;
pub use remote_ref::RemoteRef;
pub use store::ClientScope;
pub use store::ObjectKey;
pub use store::StoreKind;
pub use store::StoreSpec;
pub use webhook::CaProvider;
pub use webhook::CaProviderKind;
pub use webhook::DEFAULT_METHOD;
pub use webhook::SecretBinding;
pub use webhook::SecretKeySelector;
pub use webhook::WebhookProviderConfig;
pub use webhook::WebhookResult;
