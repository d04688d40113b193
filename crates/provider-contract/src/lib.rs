// crates/provider-contract/src/lib.rs
// ============================================================================
// Module: Provider Contract Library
// Description: Contract-test harness for the Provider CRUD HTTP service.
// Purpose: Build authenticated requests, execute them, and verify envelopes.
// Dependencies: base64, reqwest, serde, serde_json, serde_jcs, thiserror, toml, url
// ============================================================================

//! ## Overview
//! The harness is one linear pipeline: build an authenticated request,
//! execute it against the configured base URL, decode the `{data, success}`
//! envelope, and assert expectations. Scenarios are declarative records
//! driven by a single runner; see [`scenario::run_suite`].
//!
//! Security posture: service responses are untrusted and decode failures are
//! reported, never defaulted. Credentials are redacted from debug output and
//! transcripts.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod auth;
pub mod checker;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod report;
pub mod request;
pub mod scenario;
pub mod transcript;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use auth::AuthScheme;
pub use auth::Credentials;
pub use auth::build_auth_header;
pub use client::ProviderClient;
pub use client::RawResponse;
pub use config::ConfigError;
pub use config::ContractConfig;
pub use envelope::DeleteProviderResponse;
pub use envelope::Provider;
pub use envelope::ProviderResponse;
pub use envelope::ProvidersResponse;
pub use error::ContractError;
pub use report::ScenarioOutcome;
pub use report::ScenarioStatus;
pub use report::SuiteReport;
pub use request::FormEncoding;
pub use request::ProviderForm;
pub use request::ProviderRequest;
pub use request::build_request;
pub use scenario::Scenario;
pub use scenario::ScenarioContext;
pub use scenario::ScenarioKind;
pub use scenario::default_suite;
pub use scenario::extended_suite;
pub use scenario::run_scenario;
pub use scenario::run_suite;
pub use transcript::TranscriptEntry;
pub use transcript::TranscriptLog;
pub use transcript::TranscriptSink;
