// crates/provider-contract/src/config/mod.rs
// ============================================================================
// Module: Contract Configuration
// Description: Centralized configuration for the provider contract harness.
// Purpose: Provide typed access to harness settings, defaults, and overrides.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! Harness configuration is read from an optional TOML file plus environment
//! overrides and mapped into a single typed structure that every scenario
//! receives explicitly.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;
mod settings;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::ContractEnv;
pub use env::read_env_strict;
pub use settings::ConfigError;
pub use settings::ContractConfig;
pub use settings::DEFAULT_BASE_URL;
pub use settings::DEFAULT_PASSWORD;
pub use settings::DEFAULT_USERNAME;
pub use settings::MAX_CONFIG_FILE_SIZE;
