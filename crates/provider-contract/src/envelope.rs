// crates/provider-contract/src/envelope.rs
// ============================================================================
// Module: Provider Envelopes
// Description: Wire types for Provider resources and response envelopes.
// Purpose: Decode `{data, success}` bodies returned by every endpoint.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every endpoint wraps its payload in an envelope with a `success` flag.
//! Unknown keys are ignored; a missing `data` or `success` key is a decode
//! failure.

use serde::Deserialize;
use serde::Serialize;

/// Provider resource as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    /// Server-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Price.
    pub price: f64,
}

/// Envelope wrapping a single Provider (POST, PUT).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Created or replaced Provider.
    pub data: Provider,
    /// Service-reported success flag.
    pub success: bool,
}

/// Envelope wrapping the ordered Provider list (GET).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvidersResponse {
    /// Providers in service order.
    pub data: Vec<Provider>,
    /// Service-reported success flag.
    pub success: bool,
}

/// Envelope returned by DELETE, carrying only the success flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteProviderResponse {
    /// Service-reported success flag.
    pub success: bool,
}

/// Envelope types with a stable name for failure reports.
pub trait Envelope: for<'de> Deserialize<'de> {
    /// Type name shown in decode failures.
    const NAME: &'static str;
}

impl Envelope for ProviderResponse {
    const NAME: &'static str = "ProviderResponse";
}

impl Envelope for ProvidersResponse {
    const NAME: &'static str = "ProvidersResponse";
}

impl Envelope for DeleteProviderResponse {
    const NAME: &'static str = "DeleteProviderResponse";
}

impl Envelope for serde_json::Value {
    const NAME: &'static str = "json";
}
