// crates/provider-contract/src/config/env.rs
// ============================================================================
// Module: Contract Environment
// Description: Environment-backed overrides for the contract configuration.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 and empty values fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys read by the contract configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractEnv {
    /// Optional path to a TOML config file.
    ConfigPath,
    /// Optional base URL override.
    BaseUrl,
    /// Optional username override.
    Username,
    /// Optional password override.
    Password,
    /// Optional request timeout override in milliseconds (positive integer).
    TimeoutMs,
}

impl ContractEnv {
    /// Every key, in resolution order.
    pub const ALL: [Self; 5] =
        [Self::ConfigPath, Self::BaseUrl, Self::Username, Self::Password, Self::TimeoutMs];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigPath => "PROVIDER_CONTRACT_CONFIG",
            Self::BaseUrl => "PROVIDER_CONTRACT_BASE_URL",
            Self::Username => "PROVIDER_CONTRACT_USERNAME",
            Self::Password => "PROVIDER_CONTRACT_PASSWORD",
            Self::TimeoutMs => "PROVIDER_CONTRACT_TIMEOUT_MS",
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
pub(crate) fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive millisecond timeout.
///
/// # Errors
///
/// Returns an error when the value is missing, non-numeric, or zero.
pub(crate) fn parse_timeout_ms(name: &str, raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{name} must be a positive integer number of milliseconds"));
    }
    let millis: u64 = trimmed
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of milliseconds"))?;
    if millis == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_millis(millis))
}
