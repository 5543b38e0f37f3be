// crates/story-spoiler-suite/src/report.rs
// ============================================================================
// Module: Suite Report
// Description: Per-step outcomes and on-disk summary artifacts.
// Purpose: Report every step independently and persist a deterministic summary.
// Dependencies: serde, serde_jcs, serde_json
// ============================================================================

//! ## Overview
//! [`SuiteReport`] collects one [`StepReport`] per executed step, in order.
//! [`ReportArtifacts`] writes `summary.json` (canonical JSON) and
//! `summary.md` into a report directory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::steps::StepExecution;
use crate::steps::StepKind;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Pass/fail outcome of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// All assertions held.
    Passed,
    /// At least one assertion failed.
    Failed,
}

impl StepOutcome {
    /// Returns a short label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::Failed => "FAIL",
        }
    }
}

/// Outcome of one executed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Step identity.
    pub kind: StepKind,
    /// Step name.
    pub step: &'static str,
    /// Pass/fail outcome.
    pub outcome: StepOutcome,
    /// Observed HTTP status, when a response arrived.
    pub http_status: Option<u16>,
    /// Elapsed time in milliseconds.
    pub duration_ms: u64,
    /// Failure message for failed steps.
    pub failure: Option<String>,
}

impl StepReport {
    /// Builds a report entry from a step execution.
    #[must_use]
    pub fn from_execution(
        kind: StepKind,
        step: &'static str,
        execution: &StepExecution,
        duration_ms: u64,
    ) -> Self {
        let (outcome, failure) = match &execution.result {
            Ok(()) => (StepOutcome::Passed, None),
            Err(failure) => (StepOutcome::Failed, Some(failure.to_string())),
        };
        Self {
            kind,
            step,
            outcome,
            http_status: execution.http_status,
            duration_ms,
            failure,
        }
    }
}

/// Ordered outcomes of a suite run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    /// Identifier recorded by the create step, if any.
    pub story_id: Option<String>,
    /// Step outcomes in execution order.
    pub steps: Vec<StepReport>,
}

impl SuiteReport {
    /// Appends a step outcome.
    pub fn push(&mut self, report: StepReport) {
        self.steps.push(report);
    }

    /// Returns true when every step passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.steps.iter().all(|step| step.outcome == StepOutcome::Passed)
    }

    /// Returns the failed steps in execution order.
    pub fn failures(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|step| step.outcome == StepOutcome::Failed)
    }

    /// Returns the report entry for `kind`.
    #[must_use]
    pub fn step(&self, kind: StepKind) -> Option<&StepReport> {
        self.steps.iter().find(|step| step.kind == kind)
    }

    /// Renders a human-readable summary, one line per step.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for step in &self.steps {
            let status = step.http_status.map_or_else(|| "-".to_string(), |code| code.to_string());
            let _ = write!(
                out,
                "{} {} (status {status}, {} ms)",
                step.outcome.as_str(),
                step.step,
                step.duration_ms
            );
            if let Some(failure) = &step.failure {
                let _ = write!(out, ": {failure}");
            }
            out.push('\n');
        }
        let failed = self.failures().count();
        let _ = writeln!(out, "{} passed, {failed} failed", self.steps.len() - failed);
        out
    }

    /// Renders a markdown summary.
    #[must_use]
    pub fn render_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Story Lifecycle Summary\n\n");
        out.push_str("## Status\n\n");
        let status = if self.passed() { "passed" } else { "failed" };
        let _ = writeln!(out, "- Status: {status}");
        let _ = writeln!(out, "- Story id: {}", self.story_id.as_deref().unwrap_or("none"));
        out.push_str("\n## Steps\n\n");
        if self.steps.is_empty() {
            out.push_str("- None\n");
        }
        for step in &self.steps {
            let _ = write!(out, "- {} `{}`", step.outcome.as_str(), step.step);
            if let Some(failure) = &step.failure {
                let _ = write!(out, ": {failure}");
            }
            out.push('\n');
        }
        out
    }
}

// ============================================================================
// SECTION: Artifacts
// ============================================================================

/// Writes report artifacts into a directory.
#[derive(Debug, Clone)]
pub struct ReportArtifacts {
    /// Artifact root directory.
    root: PathBuf,
}

impl ReportArtifacts {
    /// Creates the artifact root.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn new(root: &Path) -> io::Result<Self> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Returns the artifact root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a JSON artifact using canonical JCS serialization.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the write fails.
    pub fn write_json<T: Serialize>(&self, name: &str, value: &T) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        let bytes = serde_jcs::to_vec(value).map_err(|err| io::Error::other(err.to_string()))?;
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Writes a text artifact with UTF-8 encoding.
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails.
    pub fn write_text(&self, name: &str, value: &str) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        fs::write(&path, value.as_bytes())?;
        Ok(path)
    }

    /// Writes `summary.json` and `summary.md` for a report.
    ///
    /// # Errors
    ///
    /// Returns an error when either artifact cannot be written.
    pub fn write_summary(&self, report: &SuiteReport) -> io::Result<Vec<PathBuf>> {
        Ok(vec![
            self.write_json("summary.json", report)?,
            self.write_text("summary.md", &report.render_markdown())?,
        ])
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
