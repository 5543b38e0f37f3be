// crates/story-spoiler-suite/src/main.rs
// ============================================================================
// Module: Story Spoiler Suite CLI Entry Point
// Description: Command-line runner for the story lifecycle suite.
// Purpose: Load configuration, run the suite and map the outcome to an exit code.
// Dependencies: clap, serde_jcs, story-spoiler-client, story-spoiler-suite
// ============================================================================

//! ## Overview
//! Runs the full lifecycle once against the configured API. The process exits
//! successfully only when bootstrap succeeded and every step passed. Step
//! results go to stdout; structured events go to stderr and, optionally, an
//! append-only JSON lines file.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::ValueEnum;
use story_spoiler_client::FileEventSink;
use story_spoiler_client::NoopEventSink;
use story_spoiler_client::StderrEventSink;
use story_spoiler_client::SuiteConfig;
use story_spoiler_client::SuiteEventSink;
use story_spoiler_client::TeeEventSink;
use story_spoiler_suite::ReportArtifacts;
use story_spoiler_suite::SuiteReport;
use story_spoiler_suite::run_suite;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Story Spoiler lifecycle suite.
#[derive(Parser, Debug)]
#[command(name = "story-spoiler-suite", version)]
struct Cli {
    /// TOML configuration file (overrides `STORY_SPOILER_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// API base URL, applied after file and environment configuration.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
    /// Output format for step results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Directory receiving `summary.json` and `summary.md`.
    #[arg(long, value_name = "DIR")]
    report_dir: Option<PathBuf>,
    /// Append structured events to this JSON lines file.
    #[arg(long, value_name = "PATH")]
    event_log: Option<PathBuf>,
    /// Suppress structured events on stderr.
    #[arg(long)]
    quiet: bool,
}

/// Output formats for step results.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Canonical JSON output.
    Json,
}

/// CLI error wrapper for user-facing failures.
#[derive(Debug)]
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
    match run(&Cli::parse()) {
        Ok(code) => code,
        Err(err) => emit_error(&err.message),
    }
}

/// Runs the suite and reports the outcome.
fn run(cli: &Cli) -> CliResult<ExitCode> {
    let config = resolve_config(cli)?;
    let sink = build_sink(cli)?;
    let report =
        run_suite(&config, sink.as_ref()).map_err(|err| CliError::new(err.to_string()))?;
    if let Some(dir) = &cli.report_dir {
        ReportArtifacts::new(dir)
            .and_then(|artifacts| artifacts.write_summary(&report))
            .map_err(|err| {
                CliError::new(format!("failed to write report to {}: {err}", dir.display()))
            })?;
    }
    let rendered = render_report(&report, cli.format)?;
    write_stdout(&rendered)
        .map_err(|err| CliError::new(format!("failed to write stdout: {err}")))?;
    Ok(if report.passed() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads configuration and applies command-line overrides.
fn resolve_config(cli: &Cli) -> CliResult<SuiteConfig> {
    let mut config = SuiteConfig::load(cli.config.as_deref())
        .map_err(|err| CliError::new(format!("invalid configuration: {err}")))?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
        config.validate().map_err(|err| CliError::new(format!("invalid configuration: {err}")))?;
    }
    Ok(config)
}

/// Builds the event sink selected by the CLI flags.
fn build_sink(cli: &Cli) -> CliResult<Box<dyn SuiteEventSink>> {
    let mut sinks: Vec<Box<dyn SuiteEventSink>> = Vec::new();
    if !cli.quiet {
        sinks.push(Box::new(StderrEventSink));
    }
    if let Some(path) = &cli.event_log {
        let file = FileEventSink::new(path).map_err(|err| {
            CliError::new(format!("failed to open event log {}: {err}", path.display()))
        })?;
        sinks.push(Box::new(file));
    }
    Ok(match sinks.len() {
        0 => Box::new(NoopEventSink),
        1 => sinks.remove(0),
        _ => Box::new(TeeEventSink::new(sinks)),
    })
}

/// Renders step results in the requested format.
fn render_report(report: &SuiteReport, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Text => Ok(report.render_text()),
        OutputFormat::Json => serde_jcs::to_string(report)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|err| CliError::new(format!("failed to serialize report: {err}"))),
    }
}

/// Writes rendered output to stdout.
fn write_stdout(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(message.as_bytes())
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
