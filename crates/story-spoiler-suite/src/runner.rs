// crates/story-spoiler-suite/src/runner.rs
// ============================================================================
// Module: Lifecycle Runner
// Description: Session bootstrap followed by the ordered step driver loop.
// Purpose: Run every step exactly once, in order, and report each outcome.
// Dependencies: story-spoiler-client, thiserror
// ============================================================================

//! ## Overview
//! [`run_suite`] validates configuration, bootstraps the session and hands the
//! authenticated client to [`run_lifecycle`]. A bootstrap failure aborts the
//! run before any step executes. A failing step never prevents the steps after
//! it from running; dependent steps report their own failure instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Instant;

use story_spoiler_client::BootstrapError;
use story_spoiler_client::ConfigError;
use story_spoiler_client::EventOutcome;
use story_spoiler_client::Session;
use story_spoiler_client::StoryApiClient;
use story_spoiler_client::StoryId;
use story_spoiler_client::SuiteConfig;
use story_spoiler_client::SuiteEvent;
use story_spoiler_client::SuiteEventKind;
use story_spoiler_client::SuiteEventSink;
use story_spoiler_client::events::millis;
use thiserror::Error;

use crate::context::SuiteContext;
use crate::report::StepReport;
use crate::report::SuiteReport;
use crate::steps::LIFECYCLE;
use crate::steps::LifecycleStep;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures that stop the suite before any step runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SuiteError {
    /// Configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The session could not be established.
    #[error("session bootstrap failed: {0}")]
    Bootstrap(#[from] BootstrapError),
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Bootstraps a session and runs the full lifecycle.
///
/// # Errors
///
/// Returns [`SuiteError`] when configuration is invalid or bootstrap fails.
/// Step failures are reported in the returned [`SuiteReport`].
pub fn run_suite(
    config: &SuiteConfig,
    sink: &dyn SuiteEventSink,
) -> Result<SuiteReport, SuiteError> {
    config.validate()?;
    let missing_story_id = StoryId::parse(&config.missing_story_id).ok_or_else(|| {
        ConfigError::Invalid("missing_story_id must be non-empty".to_string())
    })?;
    let session = Session::bootstrap(config, sink)?;
    let mut context = SuiteContext::new(missing_story_id);
    let report = run_lifecycle(session.client(), &mut context, sink);
    session.close(sink);
    Ok(report)
}

/// Runs [`LIFECYCLE`] against an authenticated client.
#[must_use]
pub fn run_lifecycle(
    client: &StoryApiClient,
    context: &mut SuiteContext,
    sink: &dyn SuiteEventSink,
) -> SuiteReport {
    run_steps(&LIFECYCLE, client, context, sink)
}

/// Runs `steps` in order, recording one report entry per step.
#[must_use]
pub fn run_steps(
    steps: &[LifecycleStep],
    client: &StoryApiClient,
    context: &mut SuiteContext,
    sink: &dyn SuiteEventSink,
) -> SuiteReport {
    let mut report = SuiteReport::default();
    for step in steps {
        sink.record(&SuiteEvent::new(SuiteEventKind::StepStarted).with_step(step.name));
        let started = Instant::now();
        let execution = (step.run)(client, context);
        let elapsed = millis(started.elapsed());
        let entry = StepReport::from_execution(step.kind, step.name, &execution, elapsed);
        let outcome = if execution.result.is_ok() { EventOutcome::Ok } else { EventOutcome::Error };
        let mut event = SuiteEvent::new(SuiteEventKind::StepFinished)
            .with_step(step.name)
            .with_outcome(outcome)
            .with_http_status(execution.http_status)
            .with_duration_ms(elapsed);
        if let Some(failure) = &entry.failure {
            event = event.with_detail(failure.clone());
        }
        sink.record(&event);
        report.push(entry);
    }
    report.story_id = context.recorded_story_id().map(ToString::to_string);
    report
}

// ============================================================================
// SECTION: Tests
// ============================================================================
