// crates/story-spoiler-client/src/client.rs
// ============================================================================
// Module: Story API Client
// Description: Blocking HTTP client for the Story Spoiler endpoints.
// Purpose: Issue one synchronous request per call and capture status + body.
// Dependencies: reqwest, serde, url
// ============================================================================

//! ## Overview
//! [`StoryApiClient`] wraps a blocking `reqwest` client. Every call waits for
//! the full response before returning so server-side effects are visible to
//! the next call. The client never retries; transport failures surface as
//! [`ClientError`]. Once a bearer token is attached it is sent on every story
//! request; the authentication call itself is always sent without it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use reqwest::Method;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::config::SuiteConfig;
use crate::models::AccessToken;
use crate::models::Credentials;
use crate::models::StoryId;
use crate::models::StoryPayload;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// User agent string for outbound requests.
const USER_AGENT: &str = concat!("story-spoiler-suite/", env!("CARGO_PKG_VERSION"));

/// Endpoint path segments.
mod paths {
    /// `POST /api/User/Authentication`.
    pub const AUTHENTICATION: &[&str] = &["api", "User", "Authentication"];
    /// `POST /api/Story/Create`.
    pub const CREATE: &[&str] = &["api", "Story", "Create"];
    /// `PUT /api/Story/Edit/{id}`.
    pub const EDIT: &[&str] = &["api", "Story", "Edit"];
    /// `GET /api/Story/All`.
    pub const ALL: &[&str] = &["api", "Story", "All"];
    /// `DELETE /api/Story/Delete/{id}`.
    pub const DELETE: &[&str] = &["api", "Story", "Delete"];
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// HTTP client errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Build(String),
    /// A request URL could not be derived from the base URL.
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
    /// The request could not be sent or no response arrived.
    #[error("{method} {url} failed: {message}")]
    Transport {
        /// HTTP method.
        method: String,
        /// Request URL.
        url: String,
        /// Underlying error message.
        message: String,
    },
    /// The response body could not be read.
    #[error("{method} {url} body read failed: {message}")]
    Body {
        /// HTTP method.
        method: String,
        /// Request URL.
        url: String,
        /// Underlying error message.
        message: String,
    },
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Status code and raw body of one API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response body as text.
    pub body: String,
}

impl ApiResponse {
    /// Returns true when the body contains `marker` verbatim.
    #[must_use]
    pub fn contains(&self, marker: &str) -> bool {
        self.body.contains(marker)
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Blocking client for the Story Spoiler API.
#[derive(Clone)]
pub struct StoryApiClient {
    /// Base URL all endpoint paths are appended to.
    base_url: Url,
    /// Underlying blocking HTTP client.
    client: Client,
    /// Bearer token attached to story requests, once issued.
    bearer_token: Option<AccessToken>,
}

impl StoryApiClient {
    /// Creates an unauthenticated client for the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &SuiteConfig) -> Result<Self, ClientError> {
        let base_url =
            config.parsed_base_url().map_err(|err| ClientError::InvalidUrl(err.to_string()))?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| ClientError::Build(err.to_string()))?;
        Ok(Self {
            base_url,
            client,
            bearer_token: None,
        })
    }

    /// Attaches a bearer token for Authorization headers.
    #[must_use]
    pub fn with_bearer_token(mut self, token: AccessToken) -> Self {
        self.bearer_token = Some(token);
        self
    }

    /// Returns true when a bearer token is attached.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.bearer_token.is_some()
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends `POST /api/User/Authentication` without a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on URL or transport failures.
    pub fn authenticate(&self, credentials: &Credentials) -> Result<ApiResponse, ClientError> {
        let url = self.endpoint(paths::AUTHENTICATION, None)?;
        let request = self.client.request(Method::POST, url.clone()).json(credentials);
        execute(request, &Method::POST, &url)
    }

    /// Sends `POST /api/Story/Create`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on URL or transport failures.
    pub fn create_story(&self, payload: &StoryPayload) -> Result<ApiResponse, ClientError> {
        self.send_json(Method::POST, paths::CREATE, None, Some(payload))
    }

    /// Sends `PUT /api/Story/Edit/{id}` with any serializable body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on URL or transport failures.
    pub fn edit_story<T: Serialize + ?Sized>(
        &self,
        id: &StoryId,
        payload: &T,
    ) -> Result<ApiResponse, ClientError> {
        self.send_json(Method::PUT, paths::EDIT, Some(id), Some(payload))
    }

    /// Sends `GET /api/Story/All`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on URL or transport failures.
    pub fn list_stories(&self) -> Result<ApiResponse, ClientError> {
        self.send_json::<()>(Method::GET, paths::ALL, None, None)
    }

    /// Sends `DELETE /api/Story/Delete/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on URL or transport failures.
    pub fn delete_story(&self, id: &StoryId) -> Result<ApiResponse, ClientError> {
        self.send_json::<()>(Method::DELETE, paths::DELETE, Some(id), None)
    }

    /// Builds and sends an authenticated story request.
    fn send_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        id: Option<&StoryId>,
        body: Option<&T>,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.endpoint(segments, id)?;
        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token.expose());
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        execute(request, &method, &url)
    }

    /// Appends endpoint segments (and an optional id) to the base URL.
    fn endpoint(&self, segments: &[&str], id: Option<&StoryId>) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                ClientError::InvalidUrl(format!("{} cannot be a base url", self.base_url))
            })?;
            path.pop_if_empty();
            path.extend(segments);
            if let Some(id) = id {
                path.push(id.as_str());
            }
        }
        Ok(url)
    }
}

/// Sends a request and reads the full body.
fn execute(
    request: RequestBuilder,
    method: &Method,
    url: &Url,
) -> Result<ApiResponse, ClientError> {
    let response = request.send().map_err(|err| ClientError::Transport {
        method: method.to_string(),
        url: url.to_string(),
        message: err.to_string(),
    })?;
    let status = response.status();
    let body = response.text().map_err(|err| ClientError::Body {
        method: method.to_string(),
        url: url.to_string(),
        message: err.to_string(),
    })?;
    Ok(ApiResponse {
        status,
        body,
    })
}
