// crates/provider-contract/src/error.rs
// ============================================================================
// Module: Provider Contract Errors
// Description: Error taxonomy for request construction, transport, and checks.
// Purpose: Surface every failed contract check with expected/actual values.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`ContractError`] is the single failure type flowing out of the request
//! builder, the client, and the checker. A scenario passes only when no error
//! is produced; every variant is reported as a scenario failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::config::ConfigError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure raised while building, executing, or checking a provider call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// Harness configuration was rejected.
    #[error("configuration error: {0}")]
    Config(String),
    /// Request could not be constructed (bad URL or header bytes).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// The service could not be reached or the exchange did not complete.
    #[error("transport failure: {0}")]
    Transport(String),
    /// Response body did not decode into the expected envelope.
    #[error("failed to decode {envelope}: {message}")]
    Decode {
        /// Envelope type name the body was decoded into.
        envelope: &'static str,
        /// Decoder message.
        message: String,
    },
    /// A checked field differed from its expected value.
    #[error("{field} mismatch: expected {expected}, got {actual}")]
    Mismatch {
        /// Checked field, for example `status` or `data.name`.
        field: String,
        /// Expected value rendered for display.
        expected: String,
        /// Actual value rendered for display.
        actual: String,
    },
}

impl ContractError {
    /// Builds a [`ContractError::Mismatch`] from displayable values.
    pub fn mismatch(
        field: impl Into<String>,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Self::Mismatch {
            field: field.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

impl From<ConfigError> for ContractError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
