// crates/provider-contract/src/scenario.rs
// ============================================================================
// Module: Contract Scenarios
// Description: Declarative scenario records and the shared scenario runner.
// Purpose: Drive every Provider contract check from one table.
// Dependencies: reqwest, serde, serde_json
// ============================================================================

//! ## Overview
//! A [`Scenario`] is a named record of inputs and expected outputs. One runner,
//! [`run_scenario`], builds the authenticated request, executes it, decodes
//! the envelope, and checks expectations for every [`ScenarioKind`].
//! [`run_suite`] runs a table sequentially; a failing scenario is recorded and
//! the next one still runs.
//!
//! Invariants:
//! - Scenarios receive configuration explicitly through [`ScenarioContext`].
//! - The Authorization value is derived per call from the scenario's
//!   credentials, falling back to the suite credentials.
//! - Scenarios run in table order on the calling thread.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Instant;

use reqwest::Method;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::auth::Credentials;
use crate::checker::STATUS_OK;
use crate::checker::STATUS_UNAUTHORIZED;
use crate::checker::decode_envelope;
use crate::checker::expect_echo;
use crate::checker::expect_list;
use crate::checker::expect_status;
use crate::checker::expect_success_matches_status;
use crate::client::ProviderClient;
use crate::client::RawResponse;
use crate::config::ContractConfig;
use crate::envelope::DeleteProviderResponse;
use crate::envelope::ProviderResponse;
use crate::envelope::ProvidersResponse;
use crate::error::ContractError;
use crate::report::ScenarioOutcome;
use crate::report::SuiteReport;
use crate::request::PROVIDER_COLLECTION_PATH;
use crate::request::ProviderForm;
use crate::request::build_request;
use crate::request::provider_item_path;

// ============================================================================
// SECTION: Scenario Records
// ============================================================================

/// One named contract check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Human-readable scenario name used in reports.
    pub name: String,
    /// Inputs and expectations.
    pub kind: ScenarioKind,
}

impl Scenario {
    /// Creates a named scenario.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ScenarioKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Inputs and expected outputs for each kind of contract check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioKind {
    /// `GET /provider` with explicit credentials; checks the status only.
    ListStatus {
        /// Credentials presented, valid or deliberately invalid.
        credentials: Credentials,
        /// Expected HTTP status.
        expected_status: u16,
    },
    /// `GET /provider`; checks list size and success flag.
    ListContents {
        /// Expected number of providers.
        expected_len: usize,
        /// Expected success flag.
        expected_success: bool,
    },
    /// `POST /provider`; checks status 200 and the echoed fields.
    Create {
        /// Submitted fields.
        form: ProviderForm,
    },
    /// `PUT /provider/{id}`; checks status 200 and the echoed fields.
    Replace {
        /// Target provider id.
        id: i64,
        /// Submitted fields.
        form: ProviderForm,
    },
    /// `DELETE /provider/{id}`; checks status and the success flag.
    ///
    /// A non-200 reply with an empty body passes on status alone.
    Delete {
        /// Target provider id.
        id: i64,
        /// Expected HTTP status.
        expected_status: u16,
    },
    /// Two `GET /provider` calls must return identical bodies.
    ListIdempotent,
    /// `POST` then `PUT` to the returned id; the PUT must echo the new fields.
    CreateThenReplace {
        /// Fields for the initial create.
        create: ProviderForm,
        /// Fields for the replacement.
        replace: ProviderForm,
    },
}

// ============================================================================
// SECTION: Suites
// ============================================================================

/// Returns the baseline contract suite.
///
/// Order matters: the list checks expect an empty store, and the replace and
/// delete checks target id `1`, which only exists once the create check has
/// run against a fresh store.
#[must_use]
pub fn default_suite() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "Should return OK HTTP status when user credentials are valid",
            ScenarioKind::ListStatus {
                credentials: Credentials::new("PatronageUser", "P@ssword1"),
                expected_status: STATUS_OK,
            },
        ),
        Scenario::new(
            "Should return Unauthorized HTTP status when user credentials are invalid",
            ScenarioKind::ListStatus {
                credentials: Credentials::new("IncorrectUser", "Incorrect"),
                expected_status: STATUS_UNAUTHORIZED,
            },
        ),
        Scenario::new(
            "Should return empty providers list and success status",
            ScenarioKind::ListContents {
                expected_len: 0,
                expected_success: true,
            },
        ),
        Scenario::new(
            "Should create provider with Test Provider name and price equal to 100",
            ScenarioKind::Create {
                form: ProviderForm::new("Test Provider", 100.0),
            },
        ),
        Scenario::new(
            "Should replace Test Provider with New Test Provider with price equal to 150",
            ScenarioKind::Replace {
                id: 1,
                form: ProviderForm::new("New Test Provider", 150.0),
            },
        ),
        Scenario::new(
            "Should delete provider with given ID",
            ScenarioKind::Delete {
                id: 1,
                expected_status: STATUS_OK,
            },
        ),
    ]
}

/// Returns the baseline suite plus idempotence and round-trip checks.
#[must_use]
pub fn extended_suite() -> Vec<Scenario> {
    let mut suite = default_suite();
    suite.push(Scenario::new(
        "Should return identical provider lists for repeated requests",
        ScenarioKind::ListIdempotent,
    ));
    suite.push(Scenario::new(
        "Should return replaced values for a freshly created provider",
        ScenarioKind::CreateThenReplace {
            create: ProviderForm::new("Round Trip Provider", 10.0),
            replace: ProviderForm::new("Round Trip Provider Updated", 20.0),
        },
    ));
    suite
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Explicit per-run inputs handed to every scenario.
#[derive(Clone, Copy)]
pub struct ScenarioContext<'a> {
    /// Harness configuration.
    pub config: &'a ContractConfig,
    /// Client used to execute requests.
    pub client: &'a ProviderClient,
}

impl<'a> ScenarioContext<'a> {
    /// Creates a context from configuration and client.
    #[must_use]
    pub const fn new(config: &'a ContractConfig, client: &'a ProviderClient) -> Self {
        Self {
            config,
            client,
        }
    }

    /// Builds, authenticates, and executes one call.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when the request cannot be built or sent.
    pub fn call(
        &self,
        credentials: &Credentials,
        method: Method,
        path: &str,
        form: Option<&ProviderForm>,
    ) -> Result<RawResponse, ContractError> {
        let auth_header = self.config.auth_scheme.header_value(credentials);
        let mut request = build_request(self.config, path, method, &auth_header)?;
        if let Some(form) = form {
            request = request.with_form(form, self.config.form_encoding)?;
        }
        self.client.execute(&request)
    }

    /// Executes a call with the suite credentials.
    fn call_as_suite(
        &self,
        method: Method,
        path: &str,
        form: Option<&ProviderForm>,
    ) -> Result<RawResponse, ContractError> {
        self.call(&self.config.credentials(), method, path, form)
    }
}

/// Runs one scenario, returning the first failed check.
///
/// # Errors
///
/// Returns [`ContractError`] for transport failures, decode failures, and
/// expectation mismatches.
pub fn run_scenario(ctx: &ScenarioContext<'_>, scenario: &Scenario) -> Result<(), ContractError> {
    match &scenario.kind {
        ScenarioKind::ListStatus {
            credentials,
            expected_status,
        } => {
            let raw = ctx.call(credentials, Method::GET, PROVIDER_COLLECTION_PATH, None)?;
            expect_status(&raw, *expected_status)
        }
        ScenarioKind::ListContents {
            expected_len,
            expected_success,
        } => {
            let raw = ctx.call_as_suite(Method::GET, PROVIDER_COLLECTION_PATH, None)?;
            let response: ProvidersResponse = decode_envelope(&raw)?;
            expect_list(&response, *expected_len, *expected_success)
        }
        ScenarioKind::Create {
            form,
        } => create_provider(ctx, form).map(|_| ()),
        ScenarioKind::Replace {
            id,
            form,
        } => replace_provider(ctx, *id, form),
        ScenarioKind::Delete {
            id,
            expected_status,
        } => {
            let raw = ctx.call_as_suite(Method::DELETE, &provider_item_path(*id), None)?;
            expect_status(&raw, *expected_status)?;
            if raw.status != STATUS_OK && raw.body.trim().is_empty() {
                return Ok(());
            }
            let response: DeleteProviderResponse = decode_envelope(&raw)?;
            expect_success_matches_status(response.success, raw.status)
        }
        ScenarioKind::ListIdempotent => {
            let first = ctx.call_as_suite(Method::GET, PROVIDER_COLLECTION_PATH, None)?;
            expect_status(&first, STATUS_OK)?;
            let second = ctx.call_as_suite(Method::GET, PROVIDER_COLLECTION_PATH, None)?;
            expect_status(&second, STATUS_OK)?;
            let first_body: Value = decode_envelope(&first)?;
            let second_body: Value = decode_envelope(&second)?;
            if first_body == second_body {
                Ok(())
            } else {
                Err(ContractError::mismatch("body", first_body, second_body))
            }
        }
        ScenarioKind::CreateThenReplace {
            create,
            replace,
        } => {
            let created = create_provider(ctx, create)?;
            replace_provider(ctx, created.data.id, replace)
        }
    }
}

/// Posts a form and checks the echoed response.
fn create_provider(
    ctx: &ScenarioContext<'_>,
    form: &ProviderForm,
) -> Result<ProviderResponse, ContractError> {
    let raw = ctx.call_as_suite(Method::POST, PROVIDER_COLLECTION_PATH, Some(form))?;
    expect_status(&raw, STATUS_OK)?;
    let response: ProviderResponse = decode_envelope(&raw)?;
    expect_echo(&response, form)?;
    Ok(response)
}

/// Puts a form to an existing id and checks the echoed response.
fn replace_provider(
    ctx: &ScenarioContext<'_>,
    id: i64,
    form: &ProviderForm,
) -> Result<(), ContractError> {
    let raw = ctx.call_as_suite(Method::PUT, &provider_item_path(id), Some(form))?;
    expect_status(&raw, STATUS_OK)?;
    let response: ProviderResponse = decode_envelope(&raw)?;
    expect_echo(&response, form)
}

/// Runs every scenario in order and collects the outcomes.
pub fn run_suite(ctx: &ScenarioContext<'_>, scenarios: &[Scenario]) -> SuiteReport {
    let outcomes = scenarios
        .iter()
        .map(|scenario| {
            let started = Instant::now();
            let result = run_scenario(ctx, scenario);
            ScenarioOutcome::from_result(&scenario.name, result, started.elapsed())
        })
        .collect();
    SuiteReport::new(ctx.config.base_url.clone(), outcomes)
}
