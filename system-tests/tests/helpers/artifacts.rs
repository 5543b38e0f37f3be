// system-tests/tests/helpers/artifacts.rs
// ============================================================================
// Module: Test Artifacts
// Description: Artifact helpers for system-tests.
// Purpose: Create per-test run roots and persist suite reports and event logs.
// Dependencies: system-tests, story-spoiler-suite, serde
// ============================================================================

use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use story_spoiler_client::events::millis;
use story_spoiler_suite::ReportArtifacts;
use story_spoiler_suite::SuiteReport;
use system_tests::config::SystemTestConfig;

#[derive(Debug, Serialize)]
struct TestOutcome {
    test_name: String,
    status: String,
    duration_ms: u64,
    notes: Vec<String>,
}

fn now_millis() -> u64 {
    millis(SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default())
}

fn run_root(test_name: &str) -> io::Result<PathBuf> {
    let config = SystemTestConfig::load().map_err(io::Error::other)?;
    let base = config.run_root.unwrap_or_else(|| {
        PathBuf::from("target/system-tests").join(format!("run_{}", now_millis()))
    });
    Ok(base.join(test_name))
}

/// Artifact directory for a single system-test.
pub struct TestArtifacts {
    inner: ReportArtifacts,
    test_name: String,
    started_at_ms: u64,
    finalized: bool,
}

impl TestArtifacts {
    /// Creates the artifact root for a test.
    pub fn new(test_name: &str) -> io::Result<Self> {
        Ok(Self {
            inner: ReportArtifacts::new(&run_root(test_name)?)?,
            test_name: test_name.to_string(),
            started_at_ms: now_millis(),
            finalized: false,
        })
    }

    /// Returns the artifact root.
    pub fn root(&self) -> &Path {
        self.inner.root()
    }

    /// Path of the JSON lines event log for this test.
    pub fn event_log(&self) -> PathBuf {
        self.root().join("events.jsonl")
    }

    /// Writes `summary.json` and `summary.md` for a suite report.
    pub fn record_report(&self, report: &SuiteReport) -> io::Result<Vec<PathBuf>> {
        self.inner.write_summary(report)
    }

    /// Writes the final test outcome.
    pub fn finish(&mut self, status: &str, notes: Vec<String>) -> io::Result<()> {
        let outcome = TestOutcome {
            test_name: self.test_name.clone(),
            status: status.to_string(),
            duration_ms: now_millis().saturating_sub(self.started_at_ms),
            notes,
        };
        self.inner.write_json("test_outcome.json", &outcome)?;
        self.finalized = true;
        Ok(())
    }
}

impl Drop for TestArtifacts {
    fn drop(&mut self) {
        if self.finalized {
            return;
        }
        let status = if std::thread::panicking() { "panic" } else { "unknown" };
        let _ = self.finish(status, vec!["test terminated without explicit outcome".to_string()]);
    }
}
