// crates/story-spoiler-client/src/session.rs
// ============================================================================
// Module: Session Bootstrapper
// Description: One-time authentication producing the shared client.
// Purpose: Fail the suite before any step when no usable token is issued.
// Dependencies: reqwest, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`Session::bootstrap`] posts the fixture credentials to the authentication
//! endpoint, extracts `accessToken` and builds the authenticated client used
//! by every lifecycle step. Anything short of a non-empty string token is a
//! [`BootstrapError`]; an empty credential is never carried forward.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Instant;

use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::client::ClientError;
use crate::client::StoryApiClient;
use crate::config::SuiteConfig;
use crate::events::EventOutcome;
use crate::events::SuiteEvent;
use crate::events::SuiteEventKind;
use crate::events::SuiteEventSink;
use crate::events::millis;
use crate::models::AccessToken;
use crate::models::Credentials;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// JSON field carrying the bearer token in the authentication response.
pub const ACCESS_TOKEN_FIELD: &str = "accessToken";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fatal session bootstrap failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    /// The HTTP client could not be built.
    #[error("client setup failed: {0}")]
    Client(ClientError),
    /// The authentication request did not complete.
    #[error("authentication request failed: {0}")]
    Transport(ClientError),
    /// Authentication answered with a non-success status.
    #[error("authentication returned status {status}: {body}")]
    UnexpectedStatus {
        /// Observed status code.
        status: u16,
        /// Response body.
        body: String,
    },
    /// The response body is not JSON.
    #[error("authentication response is not valid json: {0}")]
    InvalidJson(String),
    /// The response lacks a string `accessToken` field.
    #[error("authentication response has no string accessToken field")]
    MissingToken,
    /// The response carries an empty `accessToken`.
    #[error("authentication response has an empty accessToken")]
    EmptyToken,
}

// ============================================================================
// SECTION: Session
// ============================================================================

/// Authenticated suite session.
///
/// # Invariants
/// - Created only by [`Session::bootstrap`], so the client always carries a
///   non-empty bearer token.
/// - Immutable after creation.
pub struct Session {
    /// Base URL the session talks to.
    base_url: Url,
    /// Issued bearer token.
    token: AccessToken,
    /// Authenticated client shared by all lifecycle steps.
    client: StoryApiClient,
}

impl Session {
    /// Authenticates once and builds the shared authenticated client.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError`] when the request fails, the status is not
    /// successful, or the response carries no usable token.
    pub fn bootstrap(
        config: &SuiteConfig,
        sink: &dyn SuiteEventSink,
    ) -> Result<Self, BootstrapError> {
        let started = Instant::now();
        let result = authenticate(config);
        let elapsed = millis(started.elapsed());
        match result {
            Ok((client, token)) => {
                sink.record(
                    &SuiteEvent::new(SuiteEventKind::SessionBootstrap)
                        .with_outcome(EventOutcome::Ok)
                        .with_duration_ms(elapsed)
                        .with_detail(format!("authenticated as {}", config.username)),
                );
                Ok(Self {
                    base_url: client.base_url().clone(),
                    client: client.with_bearer_token(token.clone()),
                    token,
                })
            }
            Err(err) => {
                let status = match &err {
                    BootstrapError::UnexpectedStatus {
                        status, ..
                    } => Some(*status),
                    _ => None,
                };
                sink.record(
                    &SuiteEvent::new(SuiteEventKind::SessionBootstrap)
                        .with_outcome(EventOutcome::Error)
                        .with_http_status(status)
                        .with_duration_ms(elapsed)
                        .with_detail(err.to_string()),
                );
                Err(err)
            }
        }
    }

    /// Returns the authenticated client.
    #[must_use]
    pub const fn client(&self) -> &StoryApiClient {
        &self.client
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the issued bearer token.
    #[must_use]
    pub const fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Releases the authenticated client.
    pub fn close(self, sink: &dyn SuiteEventSink) {
        let base_url = self.base_url.to_string();
        drop(self);
        sink.record(
            &SuiteEvent::new(SuiteEventKind::SessionClosed)
                .with_outcome(EventOutcome::Ok)
                .with_detail(base_url),
        );
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Posts the credentials and extracts the token.
fn authenticate(config: &SuiteConfig) -> Result<(StoryApiClient, AccessToken), BootstrapError> {
    let client = StoryApiClient::new(config).map_err(BootstrapError::Client)?;
    let credentials = Credentials {
        username: config.username.clone(),
        password: config.password.clone(),
    };
    let response = client.authenticate(&credentials).map_err(BootstrapError::Transport)?;
    if !response.status.is_success() {
        return Err(BootstrapError::UnexpectedStatus {
            status: response.status.as_u16(),
            body: response.body,
        });
    }
    let token = extract_access_token(&response.body)?;
    Ok((client, token))
}

/// Extracts a non-empty `accessToken` string from an authentication body.
///
/// # Errors
///
/// Returns [`BootstrapError`] for non-JSON bodies, a missing or non-string
/// field, or an empty token.
pub fn extract_access_token(body: &str) -> Result<AccessToken, BootstrapError> {
    let json: Value =
        serde_json::from_str(body).map_err(|err| BootstrapError::InvalidJson(err.to_string()))?;
    let raw = json
        .get(ACCESS_TOKEN_FIELD)
        .and_then(Value::as_str)
        .ok_or(BootstrapError::MissingToken)?;
    AccessToken::parse(raw).ok_or(BootstrapError::EmptyToken)
}
