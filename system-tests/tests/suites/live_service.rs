// system-tests/tests/suites/live_service.rs
// ============================================================================
// Module: Live Service Tests
// Description: Baseline contract run against a deployed Provider service.
// Purpose: Validate a real service when its URL is configured.
// Dependencies: provider-contract, system-tests, helpers
// ============================================================================

//! ## Overview
//! Baseline contract run against a deployed Provider service.
//! Invariants:
//! - Skipped, with a recorded summary, when no service URL is configured.
//! - The target store must be empty; the suite mutates it.

use std::error::Error;
use std::io;

use helpers::artifacts::TRANSCRIPT_FILE;
use helpers::artifacts::TestReporter;
use helpers::harness::run_and_record;
use helpers::harness::transcript_client;
use helpers::timeouts::LIVE_REQUEST_TIMEOUT;
use provider_contract::default_suite;
use system_tests::config::SystemTestConfig;
use system_tests::config::SystemTestEnv;

use crate::helpers;

#[test]
fn live_service_satisfies_baseline_contract() -> Result<(), Box<dyn Error>> {
    let mut reporter = TestReporter::new("live_service_satisfies_baseline_contract")?;
    let Some(config) = SystemTestConfig::load()?.live_contract_config() else {
        reporter.finish(
            "skipped",
            vec![format!("{} is not set", SystemTestEnv::ProviderUrl.as_str())],
            vec!["summary.json".to_string(), "summary.md".to_string()],
        )?;
        return Ok(());
    };
    let client = transcript_client(reporter.artifacts(), LIVE_REQUEST_TIMEOUT)?;

    let (report, files) = run_and_record(reporter.artifacts(), &config, &client, &default_suite())?;
    let mut artifacts =
        vec!["summary.json".to_string(), "summary.md".to_string(), TRANSCRIPT_FILE.to_string()];
    artifacts.extend(files);
    if !report.all_passed() {
        reporter.finish(
            "fail",
            vec![format!("{} of {} scenarios failed", report.failed, report.outcomes.len())],
            artifacts,
        )?;
        return Err(io::Error::other(report.to_markdown()).into());
    }

    reporter.finish(
        "pass",
        vec![format!("baseline suite passed against {}", config.base_url)],
        artifacts,
    )?;
    Ok(())
}
