//! Shared test utilities for tinysparks integration tests.
//!
//! Provides a scripted [`CompletionService`] that counts its calls and
//! records the last request, plus canned plan fixtures.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::{Value, json};
use tempfile::TempDir;

use tinysparks_core::completion::{CompletionRequest, CompletionService, Credential};
use tinysparks_core::{Activity, Category, FileStore};

// ---------------------------------------------------------------------------
// Mock completion service
// ---------------------------------------------------------------------------

/// What the mock returns for one call.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Error(String),
}

/// Handle for inspecting a [`MockCompletionService`] after it has been
/// boxed into a pipeline.
#[derive(Debug, Clone, Default)]
pub struct MockProbe {
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<CompletionRequest>>>,
    last_credential: Arc<Mutex<Option<String>>>,
}

impl MockProbe {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }

    pub fn last_credential(&self) -> Option<String> {
        self.last_credential.lock().unwrap().clone()
    }
}

/// Scripted completion service. Replies are consumed in order; the last
/// reply repeats once the script runs out.
pub struct MockCompletionService {
    replies: Mutex<VecDeque<MockReply>>,
    last: Mutex<MockReply>,
    probe: MockProbe,
}

impl MockCompletionService {
    pub fn new(replies: Vec<MockReply>) -> (Self, MockProbe) {
        let last = replies
            .last()
            .cloned()
            .unwrap_or_else(|| MockReply::Text(String::new()));
        let probe = MockProbe::default();
        let service = Self {
            replies: Mutex::new(replies.into()),
            last: Mutex::new(last),
            probe: probe.clone(),
        };
        (service, probe)
    }

    /// Always reply with `text`.
    pub fn replying(text: impl Into<String>) -> (Self, MockProbe) {
        Self::new(vec![MockReply::Text(text.into())])
    }

    /// Always fail with `message`.
    pub fn failing(message: impl Into<String>) -> (Self, MockProbe) {
        Self::new(vec![MockReply::Error(message.into())])
    }
}

#[async_trait]
impl CompletionService for MockCompletionService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(
        &self,
        credential: &Credential,
        request: &CompletionRequest,
    ) -> Result<String> {
        self.probe.calls.fetch_add(1, Ordering::SeqCst);
        *self.probe.last_request.lock().unwrap() = Some(request.clone());
        *self.probe.last_credential.lock().unwrap() = Some(credential.expose().to_owned());

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.last.lock().unwrap().clone());
        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Error(message) => Err(anyhow!(message)),
        }
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Categories of a well-formed plan, in the conventional order.
pub const PLAN_CATEGORIES: [&str; 9] = [
    "Fine Motor",
    "Gross Motor",
    "Language",
    "Cognitive",
    "Sensory Play",
    "Sensory Play",
    "Sensory Play",
    "Sensory Play",
    "Sensory Play",
];

/// One service-shaped activity object (no `id`).
pub fn sample_item(index: usize, category: &str) -> Value {
    json!({
        "title": format!("Activity {index}"),
        "category": category,
        "description": format!("Step-by-step instructions for activity {index}."),
        "materials": ["paper cups", "dry pasta", "scarf", "wooden spoon", "tray"],
        "duration": "15-20 mins",
        "safetyTip": "Stay within arm's reach at all times.",
        "tags": ["Indoor", "Quiet"]
    })
}

/// Items for a well-formed nine-activity plan.
pub fn sample_plan_items() -> Vec<Value> {
    PLAN_CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, c)| sample_item(i, c))
        .collect()
}

/// Raw JSON text of a well-formed nine-activity plan.
pub fn sample_plan_json() -> String {
    Value::Array(sample_plan_items()).to_string()
}

/// A complete activity with the given id and category.
pub fn sample_activity(id: &str, category: Category) -> Activity {
    Activity {
        id: id.to_string(),
        title: format!("Saved {id}"),
        description: "A saved activity.".to_string(),
        materials: vec!["blanket".to_string()],
        duration: "10 mins".to_string(),
        safety_tip: "Supervise closely.".to_string(),
        tags: vec!["Cozy".to_string()],
        category,
    }
}

/// A [`FileStore`] in a fresh temp dir. Keep the `TempDir` alive for the
/// duration of the test.
pub fn temp_file_store() -> (TempDir, FileStore) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = FileStore::new(dir.path().join("data"));
    (dir, store)
}
