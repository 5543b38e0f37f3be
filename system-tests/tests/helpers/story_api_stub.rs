// system-tests/tests/helpers/story_api_stub.rs
// ============================================================================
// Module: Story API Stub
// Description: In-memory Story Spoiler API served over loopback HTTP.
// Purpose: Exercise the full lifecycle without network access.
// Dependencies: tiny_http, serde_json
// ============================================================================

//! ## Overview
//! The stub mirrors the observable contract of the real service: bearer
//! authentication, case-insensitive story fields, the documented status codes
//! and marker phrases. Every request is recorded for later assertions.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use tiny_http::Header;
use tiny_http::Method;
use tiny_http::Request;
use tiny_http::Response;
use tiny_http::Server;

/// Username accepted by the stub.
pub const STUB_USERNAME: &str = "stub-user";
/// Password accepted by the stub.
pub const STUB_PASSWORD: &str = "stub-pass-7f3a";
/// Token issued on successful authentication.
pub const STUB_TOKEN: &str = "stub-token-91c2";

/// How the stub answers authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Issue [`STUB_TOKEN`].
    IssueToken,
    /// Answer 200 without an `accessToken` field.
    OmitToken,
}

/// Stub behavior switches.
#[derive(Debug, Clone)]
pub struct StubOptions {
    /// Authentication behavior.
    pub auth: AuthMode,
    /// Answer every create with 500.
    pub fail_create: bool,
    /// Stories present before the first request.
    pub seed: Vec<(String, String)>,
}

impl Default for StubOptions {
    fn default() -> Self {
        Self {
            auth: AuthMode::IssueToken,
            fail_create: false,
            seed: Vec::new(),
        }
    }
}

/// A request as observed by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

/// A stored story.
#[derive(Debug, Clone)]
pub struct StoredStory {
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Default)]
struct StubState {
    stories: BTreeMap<String, StoredStory>,
    next_id: u64,
    requests: Vec<RecordedRequest>,
}

impl StubState {
    fn insert(&mut self, story: StoredStory) -> String {
        self.next_id += 1;
        let id = format!("story-{}", self.next_id);
        self.stories.insert(id.clone(), story);
        id
    }
}

/// Running stub server; shuts down on drop.
pub struct StoryApiStub {
    base_url: String,
    state: Arc<Mutex<StubState>>,
    shutdown: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl StoryApiStub {
    /// Starts a stub with default options.
    pub fn start() -> Self {
        Self::with_options(StubOptions::default())
    }

    /// Starts a stub with explicit options.
    pub fn with_options(options: StubOptions) -> Self {
        let server = Server::http("127.0.0.1:0").expect("bind stub server");
        let addr = server.server_addr().to_ip().expect("stub ip address");
        let mut initial = StubState::default();
        for (title, description) in &options.seed {
            initial.insert(StoredStory {
                title: title.clone(),
                description: description.clone(),
                url: String::new(),
            });
        }
        let state = Arc::new(Mutex::new(initial));
        let shutdown = Arc::new(AtomicBool::new(false));
        let handle = {
            let state = Arc::clone(&state);
            let shutdown = Arc::clone(&shutdown);
            thread::spawn(move || {
                while !shutdown.load(Ordering::Relaxed) {
                    match server.recv_timeout(Duration::from_millis(25)) {
                        Ok(Some(request)) => handle_request(request, &options, &state),
                        Ok(None) => {}
                        Err(_) => break,
                    }
                }
            })
        };
        Self {
            base_url: format!("http://{addr}"),
            state,
            shutdown,
            handle: Some(handle),
        }
    }

    /// Base URL clients should target.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().expect("stub state").requests.clone()
    }

    /// `METHOD /path` for each received request.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|request| format!("{} {}", request.method, request.path))
            .collect()
    }

    /// Stories currently stored.
    pub fn stories(&self) -> BTreeMap<String, StoredStory> {
        self.state.lock().expect("stub state").stories.clone()
    }
}

impl Drop for StoryApiStub {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

// ============================================================================
// SECTION: Routing
// ============================================================================

fn handle_request(mut request: Request, options: &StubOptions, state: &Mutex<StubState>) {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let method = request.method().clone();
    let path = request.url().to_string();
    let authorization = request
        .headers()
        .iter()
        .find(|header| header.field.equiv("Authorization"))
        .map(|header| header.value.as_str().to_string());

    let mut state = state.lock().expect("stub state");
    state.requests.push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        authorization: authorization.clone(),
        body: body.clone(),
    });

    let expected_auth = format!("Bearer {STUB_TOKEN}");
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    let (status, payload) = match (&method, segments.as_slice()) {
        (Method::Post, ["api", "User", "Authentication"]) => authenticate(options, &body),
        _ if authorization.as_deref() != Some(expected_auth.as_str()) => {
            (401, json!({"msg": "Unauthorized"}))
        }
        (Method::Post, ["api", "Story", "Create"]) => create(options, &mut state, &body),
        (Method::Put, ["api", "Story", "Edit", id]) => edit(&mut state, id, &body),
        (Method::Get, ["api", "Story", "All"]) => list(&state),
        (Method::Delete, ["api", "Story", "Delete", id]) => delete(&mut state, id),
        _ => (404, json!({"msg": "Not found"})),
    };
    drop(state);

    let content_type =
        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).expect("header");
    let response = Response::from_string(payload.to_string())
        .with_status_code(status)
        .with_header(content_type);
    let _ = request.respond(response);
}

fn authenticate(options: &StubOptions, body: &str) -> (u16, Value) {
    let fields = parse_object(body);
    let username = field(&fields, "username");
    let password = field(&fields, "password");
    if username.as_deref() != Some(STUB_USERNAME) || password.as_deref() != Some(STUB_PASSWORD) {
        return (401, json!({"msg": "Invalid username or password"}));
    }
    match options.auth {
        AuthMode::IssueToken => {
            (200, json!({"username": STUB_USERNAME, "accessToken": STUB_TOKEN}))
        }
        AuthMode::OmitToken => (200, json!({"username": STUB_USERNAME})),
    }
}

fn create(options: &StubOptions, state: &mut StubState, body: &str) -> (u16, Value) {
    if options.fail_create {
        return (500, json!({"msg": "Internal server error"}));
    }
    match story_from_body(body) {
        Some(story) => {
            let id = state.insert(story);
            (201, json!({"msg": "Successfully created!", "storyId": id}))
        }
        None => (400, json!({"errors": {"Title": ["The Title field is required."]}})),
    }
}

fn edit(state: &mut StubState, id: &str, body: &str) -> (u16, Value) {
    if !state.stories.contains_key(id) {
        return (404, json!({"msg": "No spoilers...", "storyId": null}));
    }
    match story_from_body(body) {
        Some(story) => {
            state.stories.insert(id.to_string(), story);
            (200, json!({"msg": "Successfully edited", "storyId": null}))
        }
        None => (400, json!({"errors": {"Title": ["The Title field is required."]}})),
    }
}

fn list(state: &StubState) -> (u16, Value) {
    let stories: Vec<Value> = state
        .stories
        .iter()
        .map(|(id, story)| {
            json!({
                "id": id,
                "title": story.title,
                "description": story.description,
                "url": story.url,
            })
        })
        .collect();
    (200, Value::Array(stories))
}

fn delete(state: &mut StubState, id: &str) -> (u16, Value) {
    if state.stories.remove(id).is_some() {
        (200, json!({"msg": "Deleted successfully!", "storyId": null}))
    } else {
        (400, json!({"msg": "Unable to delete this story spoiler!", "storyId": null}))
    }
}

// ============================================================================
// SECTION: Body Parsing
// ============================================================================

fn parse_object(body: &str) -> Map<String, Value> {
    match serde_json::from_str(body) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Case-insensitive string field lookup, like the service's model binder.
fn field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, value)| value.as_str())
        .map(ToString::to_string)
}

fn story_from_body(body: &str) -> Option<StoredStory> {
    let fields = parse_object(body);
    let title = field(&fields, "title").filter(|title| !title.trim().is_empty())?;
    Some(StoredStory {
        title,
        description: field(&fields, "description").unwrap_or_default(),
        url: field(&fields, "url").unwrap_or_default(),
    })
}
