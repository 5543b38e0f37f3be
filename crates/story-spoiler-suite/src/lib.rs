// crates/story-spoiler-suite/src/lib.rs
// ============================================================================
// Module: Story Spoiler Lifecycle Suite
// Description: Ordered end-to-end lifecycle checks for the Story Spoiler API.
// Purpose: Run create, edit, list, delete and negative cases over one session.
// Dependencies: story-spoiler-client, serde, serde_jcs, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The suite authenticates once, then runs seven ordered steps against the
//! same authenticated client: create, edit, list, delete, create without a
//! title, edit an unknown id and delete an unknown id. Each step is reported
//! independently in a [`SuiteReport`].
//! Invariants:
//! - Steps run in [`LIFECYCLE`] order, each exactly once.
//! - A bootstrap failure means no step runs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod context;
pub mod report;
pub mod runner;
pub mod steps;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use context::SuiteContext;
pub use report::ReportArtifacts;
pub use report::StepOutcome;
pub use report::StepReport;
pub use report::SuiteReport;
pub use runner::SuiteError;
pub use runner::run_lifecycle;
pub use runner::run_steps;
pub use runner::run_suite;
pub use steps::LIFECYCLE;
pub use steps::LifecycleStep;
pub use steps::StepExecution;
pub use steps::StepFailure;
pub use steps::StepKind;
pub use steps::markers;
