// crates/provider-contract/src/checker.rs
// ============================================================================
// Module: Response Contract Checker
// Description: Envelope decoding and field-by-field expectation checks.
// Purpose: Turn every contract deviation into a reportable error.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Checks return `Ok(())` or the first [`ContractError::Mismatch`] found.
//! Decoding never falls back to a default: malformed JSON, an empty body, or
//! a wrong envelope shape is a [`ContractError::Decode`].
//!
//! Invariants:
//! - Float fields compare with exact `f64` equality.
//! - A mutating response's `success` flag must be `true` exactly when the
//!   status is 200.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::client::RawResponse;
use crate::envelope::Envelope;
use crate::envelope::ProviderResponse;
use crate::envelope::ProvidersResponse;
use crate::error::ContractError;
use crate::request::ProviderForm;

/// HTTP 200.
pub const STATUS_OK: u16 = 200;
/// HTTP 401.
pub const STATUS_UNAUTHORIZED: u16 = 401;

// ============================================================================
// SECTION: Decoding
// ============================================================================

/// Decodes the response body into the envelope `T`.
///
/// # Errors
///
/// Returns [`ContractError::Decode`] when the body is empty, malformed, or
/// does not match the envelope shape.
pub fn decode_envelope<T: Envelope>(raw: &RawResponse) -> Result<T, ContractError> {
    if raw.body.trim().is_empty() {
        return Err(ContractError::Decode {
            envelope: T::NAME,
            message: format!("empty body (status {})", raw.status),
        });
    }
    serde_json::from_str(&raw.body).map_err(|err| ContractError::Decode {
        envelope: T::NAME,
        message: err.to_string(),
    })
}

// ============================================================================
// SECTION: Expectations
// ============================================================================

/// Checks the HTTP status code.
///
/// # Errors
///
/// Returns [`ContractError::Mismatch`] on `status`.
pub fn expect_status(raw: &RawResponse, expected: u16) -> Result<(), ContractError> {
    if raw.status == expected {
        Ok(())
    } else {
        Err(ContractError::mismatch("status", expected, raw.status))
    }
}

/// Checks list size and success flag.
///
/// # Errors
///
/// Returns [`ContractError::Mismatch`] on `data.len` or `success`.
pub fn expect_list(
    response: &ProvidersResponse,
    expected_len: usize,
    expected_success: bool,
) -> Result<(), ContractError> {
    if response.data.len() != expected_len {
        return Err(ContractError::mismatch("data.len", expected_len, response.data.len()));
    }
    expect_flag(response.success, expected_success)
}

/// Checks that a create/replace response echoes the submitted form.
///
/// # Errors
///
/// Returns [`ContractError::Mismatch`] on `data.name`, `data.price`, or `success`.
pub fn expect_echo(response: &ProviderResponse, form: &ProviderForm) -> Result<(), ContractError> {
    if response.data.name != form.name {
        return Err(ContractError::mismatch(
            "data.name",
            format!("{:?}", form.name),
            format!("{:?}", response.data.name),
        ));
    }
    #[allow(clippy::float_cmp, reason = "The contract requires an exact echo of the price.")]
    let price_matches = response.data.price == form.price;
    if !price_matches {
        return Err(ContractError::mismatch("data.price", form.price, response.data.price));
    }
    expect_flag(response.success, true)
}

/// Checks that the success flag is `true` exactly when the status is 200.
///
/// # Errors
///
/// Returns [`ContractError::Mismatch`] on `success`.
pub fn expect_success_matches_status(success: bool, status: u16) -> Result<(), ContractError> {
    expect_flag(success, status == STATUS_OK)
}

/// Compares the envelope success flag.
fn expect_flag(actual: bool, expected: bool) -> Result<(), ContractError> {
    if actual == expected {
        Ok(())
    } else {
        Err(ContractError::mismatch("success", expected, actual))
    }
}
