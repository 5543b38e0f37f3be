// crates/story-spoiler-client/src/events.rs
// ============================================================================
// Module: Suite Event Logging
// Description: Structured events for session bootstrap and lifecycle steps.
// Purpose: Emit JSON-line logs without hard dependencies on a logging stack.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Events are plain serializable structs routed through [`SuiteEventSink`].
//! Callers choose stderr, an append-only file, or nothing. Secrets (password,
//! bearer token) never appear in an event.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Event kind identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuiteEventKind {
    /// Authentication attempt finished.
    SessionBootstrap,
    /// A lifecycle step is about to run.
    StepStarted,
    /// A lifecycle step finished.
    StepFinished,
    /// The authenticated client was released.
    SessionClosed,
}

/// Outcome label attached to finished events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOutcome {
    /// Operation succeeded.
    Ok,
    /// Operation failed.
    Error,
}

/// Structured suite event payload.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteEvent {
    /// Event identifier.
    pub event: SuiteEventKind,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u64,
    /// Step name for step events.
    pub step: Option<&'static str>,
    /// Outcome for finished events.
    pub outcome: Option<EventOutcome>,
    /// HTTP status observed, when a response arrived.
    pub http_status: Option<u16>,
    /// Elapsed time in milliseconds for finished events.
    pub duration_ms: Option<u64>,
    /// Failure or context message.
    pub detail: Option<String>,
}

impl SuiteEvent {
    /// Creates an event of the given kind stamped with the current time.
    #[must_use]
    pub fn new(event: SuiteEventKind) -> Self {
        Self {
            event,
            timestamp_ms: now_millis(),
            step: None,
            outcome: None,
            http_status: None,
            duration_ms: None,
            detail: None,
        }
    }

    /// Attaches a step name.
    #[must_use]
    pub const fn with_step(mut self, step: &'static str) -> Self {
        self.step = Some(step);
        self
    }

    /// Attaches an outcome.
    #[must_use]
    pub const fn with_outcome(mut self, outcome: EventOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// Attaches an HTTP status code.
    #[must_use]
    pub const fn with_http_status(mut self, status: Option<u16>) -> Self {
        self.http_status = status;
        self
    }

    /// Attaches an elapsed duration.
    #[must_use]
    pub const fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Attaches a detail message.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> u64 {
    millis(SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default())
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
#[must_use]
pub fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Event sink for suite logging.
pub trait SuiteEventSink: Send + Sync {
    /// Record an event.
    fn record(&self, event: &SuiteEvent);
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Event sink that logs JSON lines to stderr.
pub struct StderrEventSink;

impl SuiteEventSink for StderrEventSink {
    fn record(&self, event: &SuiteEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Event sink that logs JSON lines to a file.
pub struct FileEventSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileEventSink {
    /// Opens the event log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl SuiteEventSink for FileEventSink {
    fn record(&self, event: &SuiteEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op event sink.
pub struct NoopEventSink;

impl SuiteEventSink for NoopEventSink {
    fn record(&self, _event: &SuiteEvent) {}
}

/// Fan-out sink recording into several sinks in order.
pub struct TeeEventSink {
    /// Downstream sinks.
    sinks: Vec<Box<dyn SuiteEventSink>>,
}

impl TeeEventSink {
    /// Creates a fan-out sink.
    #[must_use]
    pub fn new(sinks: Vec<Box<dyn SuiteEventSink>>) -> Self {
        Self {
            sinks,
        }
    }
}

impl SuiteEventSink for TeeEventSink {
    fn record(&self, event: &SuiteEvent) {
        for sink in &self.sinks {
            sink.record(event);
        }
    }
}
