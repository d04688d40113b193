// crates/provider-contract/src/config/settings.rs
// ============================================================================
// Module: Contract Configuration
// Description: Configuration loading and validation for the contract harness.
// Purpose: Provide strict, fail-closed config parsing with env overrides.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! [`ContractConfig`] is the explicit configuration object handed to every
//! scenario: base URL, suite credentials, auth scheme, form encoding, and an
//! optional request timeout. It is loaded from a TOML file (explicit path or
//! `PROVIDER_CONTRACT_CONFIG`), falls back to built-in defaults, and then
//! applies environment overrides.
//!
//! Invariants:
//! - Config files are at most [`MAX_CONFIG_FILE_SIZE`] bytes and UTF-8.
//! - Unknown keys are rejected.
//! - A loaded config has always passed [`ContractConfig::validate`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use super::env::ContractEnv;
use super::env::parse_timeout_ms;
use super::env::read_env_nonempty;
use crate::auth::AuthScheme;
use crate::auth::Credentials;
use crate::request::FormEncoding;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
/// Suite username used when nothing else is configured.
pub const DEFAULT_USERNAME: &str = "PatronageUser";
/// Suite password used when nothing else is configured.
pub const DEFAULT_PASSWORD: &str = "P@ssword1";

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Harness configuration shared by every scenario in a suite run.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContractConfig {
    /// Service base URL, for example `http://localhost:8080`.
    pub base_url: String,
    /// Suite username for scenarios without explicit credentials.
    pub username: String,
    /// Suite password for scenarios without explicit credentials.
    pub password: String,
    /// Authorization header encoding.
    pub auth_scheme: AuthScheme,
    /// Form body encoding for POST/PUT.
    pub form_encoding: FormEncoding,
    /// Optional request timeout in milliseconds; `None` applies no timeout.
    pub timeout_ms: Option<u64>,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            auth_scheme: AuthScheme::default(),
            form_encoding: FormEncoding::default(),
            timeout_ms: None,
        }
    }
}

impl fmt::Debug for ContractConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("auth_scheme", &self.auth_scheme)
            .field("form_encoding", &self.form_encoding)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl ContractConfig {
    /// Loads configuration using the default resolution rules.
    ///
    /// Resolution order: `path`, then `PROVIDER_CONTRACT_CONFIG`, then built-in
    /// defaults. Environment overrides are applied last.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, overrides, or validation fail.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match resolve_path(path)? {
            Some(resolved) => Self::read_file(&resolved)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document without consulting the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a config file with size and encoding limits.
    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Applies `PROVIDER_CONTRACT_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when an override is empty, not UTF-8,
    /// or not parseable.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(base_url) = read_env_nonempty(ContractEnv::BaseUrl.as_str())? {
            self.base_url = base_url;
        }
        if let Some(username) = read_env_nonempty(ContractEnv::Username.as_str())? {
            self.username = username;
        }
        if let Some(password) = read_env_nonempty(ContractEnv::Password.as_str())? {
            self.password = password;
        }
        if let Some(raw) = read_env_nonempty(ContractEnv::TimeoutMs.as_str())? {
            let timeout = parse_timeout_ms(ContractEnv::TimeoutMs.as_str(), &raw)?;
            self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        }
        Ok(())
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a field is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url)
            .map_err(|err| ConfigError::Invalid(format!("base_url is not a valid url: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "base_url scheme must be http or https, got {}",
                url.scheme()
            )));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(ConfigError::Invalid("base_url must include a host".to_string()));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ConfigError::Invalid(
                "base_url must not include a query or fragment".to_string(),
            ));
        }
        if self.username.trim().is_empty() {
            return Err(ConfigError::Invalid("username must not be empty".to_string()));
        }
        if self.timeout_ms == Some(0) {
            return Err(ConfigError::Invalid("timeout_ms must be greater than zero".to_string()));
        }
        Ok(())
    }

    /// Returns a copy with a different base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns the suite credentials.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<String> for ConfigError {
    fn from(message: String) -> Self {
        Self::Invalid(message)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the caller or the environment.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    Ok(read_env_nonempty(ContractEnv::ConfigPath.as_str())?.map(PathBuf::from))
}
