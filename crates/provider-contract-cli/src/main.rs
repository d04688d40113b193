// crates/provider-contract-cli/src/main.rs
// ============================================================================
// Module: Provider Contract CLI Entry Point
// Description: Command dispatcher for running Provider contract suites.
// Purpose: Run the suite against a live service and report pass/fail.
// Dependencies: clap, provider-contract, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `provider-contract run` loads configuration, runs the scenario table
//! against the configured service, and prints a Markdown report.
//! `provider-contract auth-header` prints the Authorization value for a pair
//! of credentials.
//!
//! Exit codes: `0` when every scenario passes, `1` when any scenario fails,
//! `2` on configuration, input, or output errors.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use provider_contract::AuthScheme;
use provider_contract::ContractConfig;
use provider_contract::Credentials;
use provider_contract::ProviderClient;
use provider_contract::Scenario;
use provider_contract::ScenarioContext;
use provider_contract::SuiteReport;
use provider_contract::TranscriptLog;
use provider_contract::TranscriptSink;
use provider_contract::default_suite;
use provider_contract::extended_suite;
use provider_contract::run_suite;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum accepted size for a scenario table file.
const MAX_SCENARIO_FILE_SIZE: usize = 1024 * 1024;

/// Exit code used for configuration, input, and output errors.
const EXIT_USAGE: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "provider-contract", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the contract suite against a Provider service.
    Run(RunCommand),
    /// Print the Authorization header value for a pair of credentials.
    AuthHeader(AuthHeaderCommand),
}

/// Configuration for the `run` command.
#[derive(Args, Debug)]
struct RunCommand {
    /// Path to a TOML config file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Base URL override, applied after config and environment.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
    /// Include idempotence and round-trip scenarios.
    #[arg(long, conflicts_with = "scenarios")]
    extended: bool,
    /// JSON file with a custom scenario table.
    #[arg(long, value_name = "PATH")]
    scenarios: Option<PathBuf>,
    /// Directory receiving `report.json` and `report.md`.
    #[arg(long, value_name = "DIR")]
    report_dir: Option<PathBuf>,
    /// File receiving a JSON-lines transcript of every exchange.
    #[arg(long, value_name = "PATH")]
    transcript: Option<PathBuf>,
}

/// Configuration for the `auth-header` command.
#[derive(Args, Debug)]
struct AuthHeaderCommand {
    /// Username to encode.
    #[arg(long)]
    username: String,
    /// Password to encode.
    #[arg(long)]
    password: String,
    /// Header scheme.
    #[arg(long, value_enum, default_value_t = SchemeArg::SplitBase64)]
    scheme: SchemeArg,
}

/// Authorization schemes selectable on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SchemeArg {
    /// `base64(user):base64(pass)`.
    SplitBase64,
    /// `Basic base64(user:pass)`.
    Basic,
}

impl From<SchemeArg> for AuthScheme {
    fn from(value: SchemeArg) -> Self {
        match value {
            SchemeArg::SplitBase64 => Self::SplitBase64,
            SchemeArg::Basic => Self::Basic,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a rendered message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Commands::Run(command) => command_run(&command),
        Commands::AuthHeader(command) => command_auth_header(&command),
    }
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Executes the `run` command.
fn command_run(command: &RunCommand) -> CliResult<ExitCode> {
    let config = load_config(command)?;
    let scenarios = match &command.scenarios {
        Some(path) => load_scenarios(path)?,
        None if command.extended => extended_suite(),
        None => default_suite(),
    };

    let mut client = ProviderClient::from_config(&config)
        .map_err(|err| CliError::new(format!("failed to build client: {err}")))?;
    if let Some(path) = &command.transcript {
        let file = File::create(path).map_err(|err| {
            CliError::new(format!("failed to create transcript {}: {err}", path.display()))
        })?;
        let sink: Arc<dyn TranscriptSink> = Arc::new(TranscriptLog::new(file));
        client = client.with_sink(sink);
    }

    let report = run_suite(&ScenarioContext::new(&config, &client), &scenarios);
    write_stdout_line(&report.to_markdown())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    if let Some(dir) = &command.report_dir {
        write_report(&report, dir)?;
    }
    Ok(suite_exit_code(&report))
}

/// Loads configuration and applies the command-line base URL override.
fn load_config(command: &RunCommand) -> CliResult<ContractConfig> {
    let mut config = ContractConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("config error: {err}")))?;
    if let Some(base_url) = &command.base_url {
        config = config.with_base_url(base_url.clone());
        config.validate().map_err(|err| CliError::new(format!("config error: {err}")))?;
    }
    Ok(config)
}

/// Reads a JSON scenario table with a size limit.
fn load_scenarios(path: &Path) -> CliResult<Vec<Scenario>> {
    let bytes = read_bytes_with_limit(path, MAX_SCENARIO_FILE_SIZE)
        .map_err(|err| CliError::new(format!("failed to read {}: {err}", path.display())))?;
    let scenarios: Vec<Scenario> = serde_json::from_slice(&bytes).map_err(|err| {
        CliError::new(format!("invalid scenario table {}: {err}", path.display()))
    })?;
    if scenarios.is_empty() {
        return Err(CliError::new(format!("scenario table {} is empty", path.display())));
    }
    Ok(scenarios)
}

/// Persists the report and lists the written files on stderr.
fn write_report(report: &SuiteReport, dir: &Path) -> CliResult<()> {
    let paths = report
        .write_to_dir(dir)
        .map_err(|err| CliError::new(format!("failed to write report: {err}")))?;
    for path in paths {
        write_stderr_line(&format!("wrote {}", path.display()))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    Ok(())
}

/// Maps a suite report to the process exit code.
fn suite_exit_code(report: &SuiteReport) -> ExitCode {
    if report.all_passed() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

// ============================================================================
// SECTION: Auth Header Command
// ============================================================================

/// Executes the `auth-header` command.
fn command_auth_header(command: &AuthHeaderCommand) -> CliResult<ExitCode> {
    let credentials = Credentials::new(command.username.clone(), command.password.clone());
    let header = AuthScheme::from(command.scheme).header_value(&credentials);
    write_stdout_line(&header).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors raised by bounded file reads.
#[derive(Debug, Error)]
enum ReadLimitError {
    /// File I/O failure.
    #[error("{0}")]
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    #[error("file is {size} bytes, limit is {limit}")]
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let size = file.metadata().map_err(ReadLimitError::Io)?.len();
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX);
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        return Err(ReadLimitError::TooLarge {
            size: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns the usage exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::from(EXIT_USAGE)
}
