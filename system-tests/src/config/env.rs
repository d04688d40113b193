// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: provider-contract, std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use provider_contract::ContractConfig;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional run root override.
    RunRoot,
    /// Base URL of a live Provider service for the live suite.
    ProviderUrl,
    /// Optional timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Allow reusing an existing run root (`true`/`false` or `1`/`0`).
    AllowOverwrite,
}

impl SystemTestEnv {
    /// All keys, in declaration order.
    pub const ALL: [Self; 4] =
        [Self::RunRoot, Self::ProviderUrl, Self::TimeoutSeconds, Self::AllowOverwrite];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RunRoot => "PROVIDER_CONTRACT_SYSTEM_TEST_RUN_ROOT",
            Self::ProviderUrl => "PROVIDER_CONTRACT_SYSTEM_TEST_PROVIDER_URL",
            Self::TimeoutSeconds => "PROVIDER_CONTRACT_SYSTEM_TEST_TIMEOUT_SEC",
            Self::AllowOverwrite => "PROVIDER_CONTRACT_SYSTEM_TEST_ALLOW_OVERWRITE",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Optional run root override.
    pub run_root: Option<PathBuf>,
    /// Live Provider service base URL; the live suite is skipped when unset.
    pub provider_url: Option<String>,
    /// Optional timeout override in seconds (positive integer).
    pub timeout: Option<Duration>,
    /// Allow reusing an existing run root (`true`/`false` or `1`/`0`).
    pub allow_overwrite: bool,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid URL, timeout, or boolean).
    pub fn load() -> Result<Self, String> {
        let run_root = read_env_nonempty(SystemTestEnv::RunRoot.as_str())?.map(PathBuf::from);
        let provider_url = read_env_nonempty(SystemTestEnv::ProviderUrl.as_str())?
            .map(|value| parse_provider_url(SystemTestEnv::ProviderUrl.as_str(), value))
            .transpose()?;
        let timeout = read_env_nonempty(SystemTestEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(SystemTestEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        let allow_overwrite = parse_bool_env(
            SystemTestEnv::AllowOverwrite.as_str(),
            read_env_nonempty(SystemTestEnv::AllowOverwrite.as_str())?,
        )?;
        Ok(Self {
            run_root,
            provider_url,
            timeout,
            allow_overwrite,
        })
    }

    /// Returns harness configuration targeting the live service, if one is set.
    #[must_use]
    pub fn live_contract_config(&self) -> Option<ContractConfig> {
        self.provider_url.as_ref().map(|url| ContractConfig::default().with_base_url(url.clone()))
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
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Validates a live service base URL with the harness rules.
fn parse_provider_url(name: &str, raw: String) -> Result<String, String> {
    let url = raw.trim().to_string();
    ContractConfig::default()
        .with_base_url(url.clone())
        .validate()
        .map_err(|err| format!("{name} is not a usable base URL: {err}"))?;
    Ok(url)
}

/// Parses a positive timeout value from an environment variable string.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{name} must be a positive integer number of seconds"));
    }
    let secs: u64 = trimmed
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

/// Parses a boolean environment variable, defaulting to `false` when unset.
fn parse_bool_env(name: &str, raw: Option<String>) -> Result<bool, String> {
    let Some(value) = raw else {
        return Ok(false);
    };
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(format!("{name} must be 1, 0, true, or false"))
}
