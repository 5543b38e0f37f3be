// system-tests/src/lib.rs
// ============================================================================
// Module: Story Spoiler System Tests Library
// Description: Shared configuration for system test scenarios.
// Purpose: Provide common settings for the lifecycle system-test binaries.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration used by the Story Spoiler
//! system-test binaries in `system-tests/tests`. The stubbed lifecycle suite
//! always runs; the live suite requires the `live-api` feature.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
