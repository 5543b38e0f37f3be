// crates/story-spoiler-client/src/models.rs
// ============================================================================
// Module: Story API Wire Models
// Description: Request and response shapes for the Story Spoiler API.
// Purpose: Keep JSON field casing and identifier handling in one place.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Request bodies serialize with the exact field names the API contract uses:
//! `username`/`password` for authentication and `Title`/`Description`/`Url`
//! for story payloads. A lower-case rendition of the story payload exists for
//! the negative edit, which the contract exercises with lower-case keys.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Server-assigned story identifier.
///
/// # Invariants
/// - Never empty; construction through [`StoryId::parse`] rejects blank input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    /// Builds an identifier, returning `None` for empty or whitespace input.
    ///
    /// Non-blank input is stored exactly as issued by the server.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() { None } else { Some(Self(raw.to_string())) }
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bearer credential issued by the authentication endpoint.
///
/// # Invariants
/// - Never empty.
/// - Never rendered by `Debug` or `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Builds a token, returning `None` for empty or whitespace input.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() { None } else { Some(Self(raw.to_string())) }
    }

    /// Exposes the secret for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Authentication request body.
#[derive(Clone, Serialize)]
pub struct Credentials {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Story create/edit body using the API's capitalized field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StoryPayload {
    /// Story title (required by the API).
    pub title: String,
    /// Story description.
    pub description: String,
    /// Optional picture URL; the suite always sends an empty string.
    pub url: String,
}

impl StoryPayload {
    /// Builds a payload with an empty `Url`.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: String::new(),
        }
    }

    /// Borrows the payload with lower-case field names.
    #[must_use]
    pub fn lowercase(&self) -> LowercaseStoryPayload<'_> {
        LowercaseStoryPayload {
            title: &self.title,
            description: &self.description,
            url: &self.url,
        }
    }
}

/// Story body serialized with lower-case field names.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub struct LowercaseStoryPayload<'a> {
    /// Story title.
    pub title: &'a str,
    /// Story description.
    pub description: &'a str,
    /// Picture URL.
    pub url: &'a str,
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Generic JSON envelope returned by story endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiMessage {
    /// Human-readable outcome message.
    #[serde(default)]
    pub msg: Option<String>,
    /// Identifier of the story the message refers to.
    #[serde(default, rename = "storyId")]
    pub story_id: Option<String>,
}

impl ApiMessage {
    /// Parses the envelope from a response body.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when the body is not a JSON object of this shape.
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Returns the story identifier when present and non-empty.
    #[must_use]
    pub fn story_id(&self) -> Option<StoryId> {
        self.story_id.as_deref().and_then(StoryId::parse)
    }
}
