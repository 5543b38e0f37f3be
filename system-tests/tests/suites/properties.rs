// system-tests/tests/suites/properties.rs
// ============================================================================
// Module: Lifecycle Property-Based Tests
// Description: Randomized story payloads against the Story API stub.
// Purpose: Ensure non-empty titles always round the lifecycle and empty ones
//          are always rejected.
// Dependencies: proptest, story-spoiler-client, helpers
// ============================================================================

//! ## Overview
//! Each case starts a stub, authenticates once and drives the client directly
//! so the generated payload is the only variable.

use proptest::prelude::*;
use serde_json::Value;
use story_spoiler_client::ApiMessage;
use story_spoiler_client::NoopEventSink;
use story_spoiler_client::Session;
use story_spoiler_client::StatusCode;
use story_spoiler_client::StoryPayload;
use story_spoiler_client::SuiteConfig;
use story_spoiler_suite::markers;

use crate::helpers::story_api_stub::STUB_PASSWORD;
use crate::helpers::story_api_stub::STUB_USERNAME;
use crate::helpers::story_api_stub::StoryApiStub;

fn session_for(stub: &StoryApiStub) -> Session {
    let config = SuiteConfig::default()
        .with_base_url(stub.base_url())
        .with_credentials(STUB_USERNAME, STUB_PASSWORD);
    Session::bootstrap(&config, &NoopEventSink).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn non_empty_edits_are_accepted_and_listed(
        title in "[A-Za-z0-9][A-Za-z0-9 ]{0,39}",
        description in "[A-Za-z0-9 .,!?]{0,80}",
    ) {
        let stub = StoryApiStub::start();
        let session = session_for(&stub);
        let client = session.client();

        let created = client.create_story(&StoryPayload::new("Seed", "Seed")).unwrap();
        prop_assert_eq!(created.status, StatusCode::CREATED);
        let id = ApiMessage::from_body(&created.body).unwrap().story_id().unwrap();

        let edited = client.edit_story(&id, &StoryPayload::new(&title, &description)).unwrap();
        prop_assert_eq!(edited.status, StatusCode::OK);
        prop_assert!(edited.contains(markers::EDITED));

        let listed = client.list_stories().unwrap();
        let stories: Vec<Value> = serde_json::from_str(&listed.body).unwrap();
        prop_assert!(stories.iter().any(|story| story["title"] == title.as_str()));
    }

    #[test]
    fn empty_title_is_always_rejected(description in "[A-Za-z0-9 ]{0,80}") {
        let stub = StoryApiStub::start();
        let session = session_for(&stub);

        let response = session.client().create_story(&StoryPayload::new("", &description)).unwrap();
        prop_assert_eq!(response.status, StatusCode::BAD_REQUEST);
        prop_assert!(stub.stories().is_empty());
    }
}
