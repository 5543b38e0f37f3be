// crates/story-spoiler-suite/src/steps.rs
// ============================================================================
// Module: Lifecycle Steps
// Description: The seven ordered story lifecycle steps and their assertions.
// Purpose: Describe each step as data so one driver loop can run them in order.
// Dependencies: story-spoiler-client, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`LIFECYCLE`] lists the step descriptors in execution order:
//! create, edit, list, delete, then the three negative cases. Each step sends
//! exactly one request (or none, when its identifier precondition is unmet)
//! and checks status code and marker phrase against the API contract.
//! Invariants:
//! - Only the create step writes the story identifier.
//! - Edit and delete never target an empty path segment.
//! - No step retries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use story_spoiler_client::ApiMessage;
use story_spoiler_client::ApiResponse;
use story_spoiler_client::ClientError;
use story_spoiler_client::StatusCode;
use story_spoiler_client::StoryApiClient;
use story_spoiler_client::StoryPayload;
use thiserror::Error;

use crate::context::SuiteContext;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Title of the story created by the happy path.
pub const CREATE_TITLE: &str = "My First Story";
/// Description of the story created by the happy path.
pub const CREATE_DESCRIPTION: &str = "This is just a test story";
/// Title sent by the edit step.
pub const EDIT_TITLE: &str = "My Updated Story";
/// Description sent by the edit step.
pub const EDIT_DESCRIPTION: &str = "This is just an updated test story";
/// Title sent when editing the sentinel identifier.
pub const MISSING_EDIT_TITLE: &str = "Does Not Exist";
/// Description sent when editing the sentinel identifier.
pub const MISSING_EDIT_DESCRIPTION: &str = "Fake story";

/// Marker phrases the API includes in response bodies.
pub mod markers {
    /// Successful create.
    pub const CREATED: &str = "Successfully created!";
    /// Successful edit.
    pub const EDITED: &str = "Successfully edited";
    /// Successful delete.
    pub const DELETED: &str = "Deleted successfully!";
    /// Edit of an unknown identifier.
    pub const NOT_FOUND: &str = "No spoilers...";
    /// Delete of an unknown identifier.
    pub const UNABLE_TO_DELETE: &str = "Unable to delete this story spoiler!";
}

// ============================================================================
// SECTION: Failures
// ============================================================================

/// Per-step assertion failures. None of these stop the suite.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StepFailure {
    /// The request did not produce a response.
    #[error("request failed: {0}")]
    Transport(ClientError),
    /// The status code differs from the contract.
    #[error("expected status {expected}, got {actual}: {body}")]
    UnexpectedStatus {
        /// Status the contract requires.
        expected: u16,
        /// Status observed.
        actual: u16,
        /// Response body.
        body: String,
    },
    /// The body lacks the contract's marker phrase.
    #[error("response body does not contain \"{marker}\": {body}")]
    MissingMarker {
        /// Expected marker phrase.
        marker: &'static str,
        /// Response body.
        body: String,
    },
    /// The create response carries no usable `storyId`.
    #[error("create response carries no storyId: {body}")]
    NoStoryIdInResponse {
        /// Response body.
        body: String,
    },
    /// A dependent step ran without an identifier from the create step.
    #[error("no story id was recorded by the create step")]
    MissingStoryId,
    /// The create step tried to record a second identifier.
    #[error("story id already recorded as {0}")]
    StoryIdAlreadyRecorded(String),
    /// The body is not the JSON shape the step expects.
    #[error("response body is not valid json: {0}")]
    InvalidJson(String),
    /// The collection endpoint returned no entries.
    #[error("expected a non-empty story collection")]
    EmptyCollection,
}

// ============================================================================
// SECTION: Step Descriptors
// ============================================================================

/// Identifies a lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Create a story with all required fields.
    Create,
    /// Edit the created story.
    Edit,
    /// List all stories.
    List,
    /// Delete the created story.
    Delete,
    /// Create a story without a title.
    CreateInvalid,
    /// Edit the sentinel identifier.
    EditMissing,
    /// Delete the sentinel identifier.
    DeleteMissing,
}

/// Status code plus assertion result of one executed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepExecution {
    /// Status of the response, when one arrived.
    pub http_status: Option<u16>,
    /// Assertion result.
    pub result: Result<(), StepFailure>,
}

impl StepExecution {
    /// Execution that failed before any request was sent.
    const fn unsent(failure: StepFailure) -> Self {
        Self {
            http_status: None,
            result: Err(failure),
        }
    }
}

/// Signature shared by all step bodies.
pub type StepFn = fn(&StoryApiClient, &mut SuiteContext) -> StepExecution;

/// Ordered step descriptor.
#[derive(Clone, Copy)]
pub struct LifecycleStep {
    /// Step identity.
    pub kind: StepKind,
    /// Stable step name used in reports and events.
    pub name: &'static str,
    /// Step body.
    pub run: StepFn,
}

/// The lifecycle, in execution order.
pub const LIFECYCLE: [LifecycleStep; 7] = [
    LifecycleStep {
        kind: StepKind::Create,
        name: "create_story_with_required_fields",
        run: create_story,
    },
    LifecycleStep {
        kind: StepKind::Edit,
        name: "edit_story",
        run: edit_story,
    },
    LifecycleStep {
        kind: StepKind::List,
        name: "list_all_stories",
        run: list_stories,
    },
    LifecycleStep {
        kind: StepKind::Delete,
        name: "delete_story",
        run: delete_story,
    },
    LifecycleStep {
        kind: StepKind::CreateInvalid,
        name: "create_story_without_title",
        run: create_story_without_title,
    },
    LifecycleStep {
        kind: StepKind::EditMissing,
        name: "edit_missing_story",
        run: edit_missing_story,
    },
    LifecycleStep {
        kind: StepKind::DeleteMissing,
        name: "delete_missing_story",
        run: delete_missing_story,
    },
];

// ============================================================================
// SECTION: Step Bodies
// ============================================================================

/// POST a valid story; expect 201, a non-empty `storyId` and the create marker.
fn create_story(client: &StoryApiClient, context: &mut SuiteContext) -> StepExecution {
    let payload = StoryPayload::new(CREATE_TITLE, CREATE_DESCRIPTION);
    observe(client.create_story(&payload), |response| {
        expect_status(response, StatusCode::CREATED)?;
        let message = ApiMessage::from_body(&response.body)
            .map_err(|err| StepFailure::InvalidJson(err.to_string()))?;
        let id = message.story_id().ok_or_else(|| StepFailure::NoStoryIdInResponse {
            body: response.body.clone(),
        })?;
        context.record_story_id(id)?;
        expect_marker(response, markers::CREATED)
    })
}

/// PUT new fields to the created story; expect 200 and the edit marker.
fn edit_story(client: &StoryApiClient, context: &mut SuiteContext) -> StepExecution {
    let id = match context.story_id() {
        Ok(id) => id.clone(),
        Err(failure) => return StepExecution::unsent(failure),
    };
    let payload = StoryPayload::new(EDIT_TITLE, EDIT_DESCRIPTION);
    observe(client.edit_story(&id, &payload), |response| {
        expect_status(response, StatusCode::OK)?;
        expect_marker(response, markers::EDITED)
    })
}

/// GET the collection; expect 200 and a non-empty JSON array.
fn list_stories(client: &StoryApiClient, _context: &mut SuiteContext) -> StepExecution {
    observe(client.list_stories(), |response| {
        expect_status(response, StatusCode::OK)?;
        let stories: Vec<Value> = serde_json::from_str(&response.body)
            .map_err(|err| StepFailure::InvalidJson(err.to_string()))?;
        if stories.is_empty() {
            return Err(StepFailure::EmptyCollection);
        }
        Ok(())
    })
}

/// DELETE the created story; expect 200 and the delete marker.
fn delete_story(client: &StoryApiClient, context: &mut SuiteContext) -> StepExecution {
    let id = match context.story_id() {
        Ok(id) => id.clone(),
        Err(failure) => return StepExecution::unsent(failure),
    };
    observe(client.delete_story(&id), |response| {
        expect_status(response, StatusCode::OK)?;
        expect_marker(response, markers::DELETED)
    })
}

/// POST a story with an empty title; expect 400.
fn create_story_without_title(
    client: &StoryApiClient,
    _context: &mut SuiteContext,
) -> StepExecution {
    let payload = StoryPayload::new("", CREATE_DESCRIPTION);
    observe(client.create_story(&payload), |response| {
        expect_status(response, StatusCode::BAD_REQUEST)
    })
}

/// PUT lower-case fields to the sentinel id; expect 404 and the not-found marker.
fn edit_missing_story(client: &StoryApiClient, context: &mut SuiteContext) -> StepExecution {
    let payload = StoryPayload::new(MISSING_EDIT_TITLE, MISSING_EDIT_DESCRIPTION);
    observe(client.edit_story(context.missing_story_id(), &payload.lowercase()), |response| {
        expect_status(response, StatusCode::NOT_FOUND)?;
        expect_marker(response, markers::NOT_FOUND)
    })
}

/// DELETE the sentinel id; expect 400 and the unable-to-delete marker.
fn delete_missing_story(client: &StoryApiClient, context: &mut SuiteContext) -> StepExecution {
    observe(client.delete_story(context.missing_story_id()), |response| {
        expect_status(response, StatusCode::BAD_REQUEST)?;
        expect_marker(response, markers::UNABLE_TO_DELETE)
    })
}

// ============================================================================
// SECTION: Assertions
// ============================================================================

/// Runs `check` against a response, or records the transport failure.
fn observe(
    sent: Result<ApiResponse, ClientError>,
    check: impl FnOnce(&ApiResponse) -> Result<(), StepFailure>,
) -> StepExecution {
    match sent {
        Ok(response) => StepExecution {
            http_status: Some(response.status.as_u16()),
            result: check(&response),
        },
        Err(err) => StepExecution::unsent(StepFailure::Transport(err)),
    }
}

/// Asserts the exact status code.
///
/// # Errors
///
/// Returns [`StepFailure::UnexpectedStatus`] on mismatch.
pub fn expect_status(response: &ApiResponse, expected: StatusCode) -> Result<(), StepFailure> {
    if response.status == expected {
        Ok(())
    } else {
        Err(StepFailure::UnexpectedStatus {
            expected: expected.as_u16(),
            actual: response.status.as_u16(),
            body: response.body.clone(),
        })
    }
}

/// Asserts the body contains `marker` verbatim.
///
/// # Errors
///
/// Returns [`StepFailure::MissingMarker`] when the phrase is absent.
pub fn expect_marker(response: &ApiResponse, marker: &'static str) -> Result<(), StepFailure> {
    if response.contains(marker) {
        Ok(())
    } else {
        Err(StepFailure::MissingMarker {
            marker,
            body: response.body.clone(),
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
