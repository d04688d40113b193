// system-tests/src/lib.rs
// ============================================================================
// Module: Provider Contract System Tests Library
// Description: Shared configuration for Provider contract system tests.
// Purpose: Provide common settings for the system-test binaries.
// Dependencies: provider-contract, std
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration used by the system-test binaries in
//! `system-tests/tests`. Stub-backed suites run the harness against an
//! in-process Provider service; the live suite targets the service named by
//! `PROVIDER_CONTRACT_SYSTEM_TEST_PROVIDER_URL`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
