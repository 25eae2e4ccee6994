//! Integration tests for the `tinysparks` binary.
//!
//! Each test runs the built executable with an isolated config home and
//! data dir. None of them reach the network: plans are either seeded
//! through the same file store the binary reads, or generated against an
//! in-process server on localhost.

use std::path::Path;
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tempfile::TempDir;

use tinysparks_core::{
    Activity, Category, FAVORITES_KEY, FileStore, KeyValueStore, LAST_PLAN_KEY,
};
use tinysparks_test_utils::{sample_activity, sample_plan_json};

// -----------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------

struct Sandbox {
    _tmp: TempDir,
    config_home: std::path::PathBuf,
    data_dir: std::path::PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let config_home = tmp.path().join("config");
        let data_dir = tmp.path().join("data");
        Self {
            _tmp: tmp,
            config_home,
            data_dir,
        }
    }

    fn store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }

    fn seed_plan(&self, plan: &[Activity]) {
        self.store()
            .set(LAST_PLAN_KEY, &serde_json::to_string(plan).unwrap())
            .unwrap();
    }

    fn run(&self, args: &[&str]) -> Output {
        self.run_with_env(args, &[])
    }

    fn run_with_env(&self, args: &[&str], envs: &[(&str, &str)]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_tinysparks"))
            .args(args)
            .arg("--data-dir")
            .arg(&self.data_dir)
            .env("XDG_CONFIG_HOME", &self.config_home)
            .env_remove("TINYSPARKS_API_KEY")
            .env_remove("GEMINI_API_KEY")
            .env_remove("API_KEY")
            .env_remove("TINYSPARKS_DATA_DIR")
            .env_remove("TINYSPARKS_BASE_URL")
            .env_remove("RUST_LOG")
            .envs(envs.iter().copied())
            .output()
            .expect("failed to run tinysparks")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn seeded_plan() -> Vec<Activity> {
    vec![
        sample_activity("dev-1", Category::FineMotor),
        sample_activity("sen-1", Category::SensoryPlay),
    ]
}

fn file_exists(dir: &Path, key: &str) -> bool {
    dir.join(format!("{key}.json")).exists()
}

#[derive(Clone)]
struct ModelServer {
    reply: Value,
    seen_key: Arc<Mutex<Option<String>>>,
}

async fn generate_content(State(server): State<ModelServer>, headers: HeaderMap) -> Json<Value> {
    *server.seen_key.lock().unwrap() = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    Json(server.reply)
}

/// Serve a fixed `generateContent` reply on localhost, recording the API
/// key of the last request. Returns the base URL.
async fn start_model_server(text: String, seen_key: Arc<Mutex<Option<String>>>) -> String {
    let reply = json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    });
    let app = Router::new()
        .route("/v1beta/models/{call}", post(generate_content))
        .with_state(ModelServer { reply, seen_key });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[test]
fn age_groups_lists_every_slug() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["age-groups"]);
    assert!(output.status.success());
    let out = stdout(&output);
    for slug in [
        "infant-young",
        "infant-older",
        "toddler-young",
        "toddler-older",
        "preschool",
    ] {
        assert!(out.contains(slug), "missing {slug} in:\n{out}");
    }
    assert!(out.contains("Preschooler (3-5 years)"));
}

#[test]
fn generate_without_api_key_fails_with_configuration_message() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["generate", "--age", "toddler-older"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(
        err.contains("API Key is missing. Please check your configuration."),
        "unexpected stderr:\n{err}"
    );
    assert!(!file_exists(&sandbox.data_dir, LAST_PLAN_KEY));
}

#[test]
fn generate_prints_sections_and_saves_last_plan() {
    let sandbox = Sandbox::new();
    let seen_key = Arc::new(Mutex::new(None));
    // The server runs on the runtime's worker threads while the binary runs.
    let rt = tokio::runtime::Runtime::new().unwrap();
    let base_url = rt.block_on(start_model_server(sample_plan_json(), seen_key.clone()));

    let output = sandbox.run_with_env(
        &["generate", "--age", "toddler-older", "--api-key", "cli-key"],
        &[("TINYSPARKS_BASE_URL", base_url.as_str())],
    );
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Developmental Milestones (4)"), "stdout:\n{out}");
    assert!(out.contains("Sensory Play Collection (5)"), "stdout:\n{out}");
    assert!(out.contains("+ 1 more"));
    assert_eq!(seen_key.lock().unwrap().as_deref(), Some("cli-key"));

    let saved = sandbox.store().get(LAST_PLAN_KEY).unwrap().unwrap();
    let plan: Vec<Activity> = serde_json::from_str(&saved).unwrap();
    assert_eq!(plan.len(), 9);
    assert!(plan.iter().all(|a| out.contains(&format!("id: {}", a.id))));

    // A later invocation shows the same plan without generating.
    let output = sandbox.run(&["plan", "--json"]);
    let shown: Vec<Activity> = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(shown, plan);
}

#[test]
fn plan_without_history_prints_hint() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["plan"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No plan yet."));
}

#[test]
fn plan_shows_sections_from_last_plan() {
    let sandbox = Sandbox::new();
    sandbox.seed_plan(&seeded_plan());

    let output = sandbox.run(&["plan"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Developmental Milestones (1)"));
    assert!(out.contains("Sensory Play Collection (1)"));
    assert!(out.contains("id: dev-1"));
}

#[test]
fn toggle_then_list_favorites_across_invocations() {
    let sandbox = Sandbox::new();
    sandbox.seed_plan(&seeded_plan());

    let output = sandbox.run(&["favorites", "toggle", "sen-1"]);
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert!(stdout(&output).contains("Saved \"Saved sen-1\" to favorites."));
    assert!(file_exists(&sandbox.data_dir, FAVORITES_KEY));

    let output = sandbox.run(&["favorites", "list", "--json"]);
    assert!(output.status.success());
    let listed: Value = serde_json::from_str(&stdout(&output)).unwrap();
    let ids: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["sen-1"]);

    let output = sandbox.run(&["favorites", "list"]);
    let out = stdout(&output);
    assert!(out.contains("Saved Sensory Ideas (1)"));
    assert!(out.contains("[*]"));

    let output = sandbox.run(&["favorites", "toggle", "sen-1"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Removed"));
    let output = sandbox.run(&["favorites", "list"]);
    assert!(stdout(&output).contains("No favorite activities yet."));
}

#[test]
fn toggle_unknown_id_fails() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["favorites", "toggle", "missing"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no activity with id \"missing\""));
}

#[test]
fn show_prints_full_detail() {
    let sandbox = Sandbox::new();
    let mut plan = seeded_plan();
    plan[0].materials = (1..=6).map(|i| format!("thing {i}")).collect();
    sandbox.seed_plan(&plan);

    let output = sandbox.run(&["favorites", "show", "dev-1"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Category: Fine Motor"));
    assert!(out.contains("  - thing 6"));
    assert!(out.contains("Favorite: no"));
}

#[test]
fn init_writes_config_and_refuses_overwrite() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["init", "--api-key", "AIzaSyExampleKey1234"]);
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert!(stdout(&output).contains("AIza...1234"));

    let written =
        std::fs::read_to_string(sandbox.config_home.join("tinysparks").join("config.toml"))
            .unwrap();
    assert!(written.contains("api_key = \"AIzaSyExampleKey1234\""));

    let output = sandbox.run(&["init"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--force"));
}
