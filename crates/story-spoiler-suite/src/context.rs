// crates/story-spoiler-suite/src/context.rs
// ============================================================================
// Module: Suite Context
// Description: Suite-scoped state threaded through the lifecycle steps.
// Purpose: Make the create -> edit/delete data dependency explicit.
// Dependencies: story-spoiler-client
// ============================================================================

//! ## Overview
//! [`SuiteContext`] is passed by mutable reference into every step. It holds
//! the identifier recorded by the create step and the sentinel identifier the
//! negative steps target.
//! Invariants:
//! - The story identifier is written at most once per run.
//! - The sentinel identifier is fixed at construction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use story_spoiler_client::StoryId;

use crate::steps::StepFailure;

// ============================================================================
// SECTION: Context
// ============================================================================

/// Mutable state shared by the ordered lifecycle steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteContext {
    /// Identifier of the story created by this run.
    story_id: Option<StoryId>,
    /// Identifier the API never issued.
    missing_story_id: StoryId,
}

impl SuiteContext {
    /// Creates an empty context targeting `missing_story_id` for negative steps.
    #[must_use]
    pub const fn new(missing_story_id: StoryId) -> Self {
        Self {
            story_id: None,
            missing_story_id,
        }
    }

    /// Records the identifier produced by the create step.
    ///
    /// # Errors
    ///
    /// Returns [`StepFailure::StoryIdAlreadyRecorded`] when an identifier was
    /// already recorded in this run.
    pub fn record_story_id(&mut self, id: StoryId) -> Result<(), StepFailure> {
        if let Some(existing) = &self.story_id {
            return Err(StepFailure::StoryIdAlreadyRecorded(existing.to_string()));
        }
        self.story_id = Some(id);
        Ok(())
    }

    /// Returns the recorded identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StepFailure::MissingStoryId`] when the create step did not
    /// record one.
    pub fn story_id(&self) -> Result<&StoryId, StepFailure> {
        self.story_id.as_ref().ok_or(StepFailure::MissingStoryId)
    }

    /// Returns the recorded identifier, if any.
    #[must_use]
    pub const fn recorded_story_id(&self) -> Option<&StoryId> {
        self.story_id.as_ref()
    }

    /// Returns the sentinel identifier for negative steps.
    #[must_use]
    pub const fn missing_story_id(&self) -> &StoryId {
        &self.missing_story_id
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
