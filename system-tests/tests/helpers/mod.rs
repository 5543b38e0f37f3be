// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for Story Spoiler system-tests.
// Purpose: Provide the in-memory Story API stub and artifact utilities.
// Dependencies: system-tests, story-spoiler-suite, tiny_http
// ============================================================================

//! ## Overview
//! Shared helpers for Story Spoiler system-tests.
//! Invariants:
//! - Stub servers bind loopback ephemeral ports and shut down on drop.
//! - Artifacts land under the configured run root.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod artifacts;
pub mod story_api_stub;
