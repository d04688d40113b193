// system-tests/tests/helpers/harness.rs
// ============================================================================
// Module: Contract Harness Builders
// Description: Helpers wiring the contract harness to a target service.
// Purpose: Build clients with resolved timeouts and per-test transcripts.
// Dependencies: provider-contract
// ============================================================================

use std::fs::File;
use std::sync::Arc;
use std::time::Duration;

use provider_contract::ContractConfig;
use provider_contract::ProviderClient;
use provider_contract::Scenario;
use provider_contract::ScenarioContext;
use provider_contract::SuiteReport;
use provider_contract::TranscriptLog;
use provider_contract::TranscriptSink;
use provider_contract::run_suite;

use super::artifacts::TestArtifacts;
use super::timeouts::resolve_timeout;

/// Builds a client whose exchanges are also written to the test transcript.
pub fn transcript_client(
    artifacts: &TestArtifacts,
    timeout: Duration,
) -> Result<ProviderClient, String> {
    let path = artifacts.transcript_path();
    let file = File::create(&path)
        .map_err(|err| format!("failed to create transcript {}: {err}", path.display()))?;
    let sink: Arc<dyn TranscriptSink> = Arc::new(TranscriptLog::new(file));
    let client = ProviderClient::new(Some(resolve_timeout(timeout)))
        .map_err(|err| format!("failed to build client: {err}"))?;
    Ok(client.with_sink(sink))
}

/// Returns harness configuration targeting a base URL with default credentials.
pub fn config_for(base_url: &str) -> ContractConfig {
    ContractConfig::default().with_base_url(base_url)
}

/// Runs a scenario table and persists the report next to the transcript.
pub fn run_and_record(
    artifacts: &TestArtifacts,
    config: &ContractConfig,
    client: &ProviderClient,
    scenarios: &[Scenario],
) -> Result<(SuiteReport, Vec<String>), String> {
    let report = run_suite(&ScenarioContext::new(config, client), scenarios);
    let files = artifacts
        .write_suite_report(&report)
        .map_err(|err| format!("failed to write suite report: {err}"))?;
    Ok((report, files))
}
