// crates/provider-contract/src/report.rs
// ============================================================================
// Module: Suite Report
// Description: Per-scenario pass/fail records and the aggregated run report.
// Purpose: Render and persist suite results with expected/actual detail.
// Dependencies: serde, serde_jcs
// ============================================================================

//! ## Overview
//! [`SuiteReport`] lists each scenario's outcome in run order. Failed
//! scenarios carry the first failing check's message and, for mismatches,
//! the field with its expected and actual values. Reports render to Markdown
//! and persist as canonical JSON.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ContractError;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Final status of one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    /// Every check passed.
    Passed,
    /// A check failed or the exchange did not complete.
    Failed,
}

impl ScenarioStatus {
    /// Returns the label used in rendered reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "pass",
            Self::Failed => "fail",
        }
    }
}

/// Detail of the first failed check in a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetail {
    /// Rendered error message.
    pub message: String,
    /// Mismatched field, when the failure was a mismatch.
    pub field: Option<String>,
    /// Expected value, when the failure was a mismatch.
    pub expected: Option<String>,
    /// Actual value, when the failure was a mismatch.
    pub actual: Option<String>,
}

impl From<&ContractError> for FailureDetail {
    fn from(err: &ContractError) -> Self {
        let (field, expected, actual) = match err {
            ContractError::Mismatch {
                field,
                expected,
                actual,
            } => (Some(field.clone()), Some(expected.clone()), Some(actual.clone())),
            _ => (None, None, None),
        };
        Self {
            message: err.to_string(),
            field,
            expected,
            actual,
        }
    }
}

/// Outcome of one scenario run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Scenario name.
    pub name: String,
    /// Pass or fail.
    pub status: ScenarioStatus,
    /// First failure, if any.
    pub failure: Option<FailureDetail>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl ScenarioOutcome {
    /// Builds an outcome from a runner result.
    #[must_use]
    pub fn from_result(name: &str, result: Result<(), ContractError>, elapsed: Duration) -> Self {
        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        match result {
            Ok(()) => Self {
                name: name.to_string(),
                status: ScenarioStatus::Passed,
                failure: None,
                duration_ms,
            },
            Err(err) => Self {
                name: name.to_string(),
                status: ScenarioStatus::Failed,
                failure: Some(FailureDetail::from(&err)),
                duration_ms,
            },
        }
    }
}

// ============================================================================
// SECTION: Suite Report
// ============================================================================

/// Aggregated results for a suite run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Base URL the suite ran against.
    pub base_url: String,
    /// Number of passed scenarios.
    pub passed: usize,
    /// Number of failed scenarios.
    pub failed: usize,
    /// Outcomes in run order.
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    /// Builds a report and tallies the outcomes.
    #[must_use]
    pub fn new(base_url: String, outcomes: Vec<ScenarioOutcome>) -> Self {
        let passed =
            outcomes.iter().filter(|outcome| outcome.status == ScenarioStatus::Passed).count();
        let failed = outcomes.len() - passed;
        Self {
            base_url,
            passed,
            failed,
            outcomes,
        }
    }

    /// Returns true when every scenario passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Returns the failed outcomes in run order.
    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.status == ScenarioStatus::Failed)
    }

    /// Renders the report as Markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Provider Contract Report\n\n");
        let _ = writeln!(out, "Target: `{}`\n", self.base_url);
        let _ = writeln!(out, "Passed: {}, Failed: {}\n", self.passed, self.failed);
        out.push_str("| Status | Scenario | Duration (ms) |\n");
        out.push_str("|---|---|---|\n");
        for outcome in &self.outcomes {
            let _ = writeln!(
                out,
                "| {} | {} | {} |",
                outcome.status.as_str(),
                outcome.name,
                outcome.duration_ms
            );
        }
        let mut failures = self.failures().peekable();
        if failures.peek().is_some() {
            out.push_str("\n## Failures\n");
            for outcome in failures {
                let _ = writeln!(out, "\n### {}\n", outcome.name);
                if let Some(failure) = &outcome.failure {
                    let _ = writeln!(out, "- message: {}", failure.message);
                    if let (Some(expected), Some(actual)) = (&failure.expected, &failure.actual) {
                        let _ = writeln!(out, "- expected: {expected}");
                        let _ = writeln!(out, "- actual: {actual}");
                    }
                }
            }
        }
        out
    }

    /// Writes `report.json` (canonical JSON) and `report.md` into `dir`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory or files cannot be written.
    pub fn write_to_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let json_path = dir.join("report.json");
        let bytes = serde_jcs::to_vec(self).map_err(|err| io::Error::other(err.to_string()))?;
        fs::write(&json_path, bytes)?;
        let md_path = dir.join("report.md");
        fs::write(&md_path, self.to_markdown())?;
        Ok(vec![json_path, md_path])
    }
}
