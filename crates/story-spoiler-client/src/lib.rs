// crates/story-spoiler-client/src/lib.rs
// ============================================================================
// Module: Story Spoiler Client
// Description: Configuration, wire models, HTTP client and session bootstrap.
// Purpose: Provide the authenticated, blocking client the lifecycle suite uses.
// Dependencies: reqwest, serde, serde_json, thiserror, toml, url
// ============================================================================

//! ## Overview
//! This crate holds everything the lifecycle suite needs to talk to the Story
//! Spoiler API: a validated [`SuiteConfig`], the JSON wire models, a blocking
//! [`StoryApiClient`], the one-time [`Session`] bootstrapper and the
//! structured event sinks used for logging.
//! Invariants:
//! - A [`Session`] exists only when authentication produced a non-empty token.
//! - Secrets never appear in `Debug` output or events.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod config;
pub mod events;
pub mod models;
pub mod session;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::ApiResponse;
pub use client::ClientError;
pub use client::StoryApiClient;
pub use config::ConfigError;
pub use config::SuiteConfig;
pub use config::SuiteEnv;
pub use events::EventOutcome;
pub use events::FileEventSink;
pub use events::NoopEventSink;
pub use events::StderrEventSink;
pub use events::SuiteEvent;
pub use events::SuiteEventKind;
pub use events::SuiteEventSink;
pub use events::TeeEventSink;
pub use models::AccessToken;
pub use models::ApiMessage;
pub use models::Credentials;
pub use models::StoryId;
pub use models::StoryPayload;
pub use reqwest::StatusCode;
pub use session::BootstrapError;
pub use session::Session;
pub use session::extract_access_token;
