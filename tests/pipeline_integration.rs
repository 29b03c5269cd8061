//! End-to-end tests for the generation pipeline with a scripted provider.

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use socratic_forge::export::read_jsonl;
use socratic_forge::llm::{
    Choice, CompletionClient, GenerationRequest, GenerationResponse, LlmProvider, Message, Usage,
};
use socratic_forge::pipeline::{DatasetGenerator, GeneratorConfig, PhaseStats, RunError};
use socratic_forge::socratic::{Scenario, Speaker};
use socratic_forge::LlmError;

/// Replies by inspecting the request: single-turn prompts get a question,
/// multi-turn prompts get a fenced JSON dialogue. Topics listed in
/// `failing` get a transport error.
struct ScriptedProvider {
    failing: Vec<&'static str>,
    requests: Mutex<Vec<GenerationRequest>>,
    call_count: AtomicUsize,
}

impl ScriptedProvider {
    fn new(failing: Vec<&'static str>) -> Self {
        Self {
            failing,
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError> {
        let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
        let user = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.requests.lock().expect("lock").push(request);

        if self.failing.iter().any(|topic| user.contains(topic)) {
            return Err(LlmError::ApiError {
                code: 503,
                message: "upstream unavailable".to_string(),
            });
        }

        let content = if user.contains("\"conversations\"") {
            r#"```json
{"conversations": [
  {"from": "human", "value": "I keep getting a stale value in my callback."},
  {"from": "gpt", "value": "What does the callback capture when it is created?"},
  {"from": "human", "value": "The value at that moment... so I need a ref!"}
]}
```"#
                .to_string()
        } else {
            "  What would you expect to happen if you ran it twice?  ".to_string()
        };

        Ok(GenerationResponse {
            id: format!("scripted-{}", idx),
            model: "scripted-model".to_string(),
            choices: vec![Choice {
                index: 0,
                message: Message::assistant(content),
                finish_reason: "stop".to_string(),
            }],
            usage: Usage::default(),
        })
    }
}

fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::question(
            "Closures",
            "What's a closure in JavaScript?",
            "Basic closure interview question",
        ),
        Scenario::misconception(
            "Async/Await",
            "Async functions run in parallel automatically.",
            "Sequential vs parallel",
        ),
        Scenario::question("Big O Notation", "Why does Big O matter?", "Complexity basics"),
    ]
}

fn generator_for(
    provider: Arc<ScriptedProvider>,
    temp_dir: &TempDir,
) -> (DatasetGenerator, std::path::PathBuf) {
    let output = temp_dir.path().join("data").join("interviewer_training_data.jsonl");
    let config = GeneratorConfig::new("test-key")
        .with_pacing(Duration::ZERO, Duration::ZERO)
        .with_scenarios(scenarios())
        .with_multi_turn_topics(vec![
            "Debugging a React infinite render loop".to_string(),
            "Optimizing a slow database query".to_string(),
        ])
        .with_output_path(&output);
    let client = CompletionClient::new(provider, "scripted-model");
    (DatasetGenerator::new(client, config), output)
}

#[tokio::test]
async fn test_full_run_writes_all_records_in_order() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let provider = Arc::new(ScriptedProvider::new(vec![]));
    let (generator, output) = generator_for(provider.clone(), &temp_dir);

    let (report, summary) = generator.run_to_file().await.expect("run should succeed");

    assert_eq!(report.single_turn, PhaseStats { attempted: 3, succeeded: 3 });
    assert_eq!(report.multi_turn, PhaseStats { attempted: 2, succeeded: 2 });
    assert_eq!(summary.records, 5);
    assert_eq!(provider.call_count.load(Ordering::SeqCst), 5);

    let records = read_jsonl(&output).expect("should read dataset");
    assert_eq!(records, report.conversations);

    let topics: Vec<&str> = records.iter().map(|r| r.topic()).collect();
    assert_eq!(
        topics,
        vec![
            "Closures",
            "Async/Await",
            "Big O Notation",
            "Debugging a React infinite render loop",
            "Optimizing a slow database query",
        ]
    );

    let first = &records[0];
    assert_eq!(first.conversations[0].from, Speaker::Human);
    assert_eq!(first.conversations[0].value, "What's a closure in JavaScript?");
    assert_eq!(
        first.conversations[1].value,
        "What would you expect to happen if you ran it twice?"
    );
    assert_eq!(first.metadata.context.as_deref(), Some("Basic closure interview question"));
    assert_eq!(first.metadata.multi_turn, None);

    let misconception = &records[1];
    assert_eq!(
        misconception.conversations[0].value,
        "Async functions run in parallel automatically."
    );

    let dialogue = &records[3];
    assert_eq!(dialogue.metadata.multi_turn, Some(true));
    assert_eq!(dialogue.metadata.context, None);
    assert_eq!(dialogue.turn_count(), 3);
}

#[tokio::test]
async fn test_requests_carry_phase_sampling_settings() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let provider = Arc::new(ScriptedProvider::new(vec![]));
    let (generator, _) = generator_for(provider.clone(), &temp_dir);

    generator.run().await.expect("run should succeed");

    let requests = provider.requests.lock().expect("lock");
    assert_eq!(requests.len(), 5);
    for request in &requests[..3] {
        assert_eq!(request.model, "scripted-model");
        assert_eq!(request.temperature, Some(0.8));
        assert_eq!(request.max_tokens, Some(150));
        assert_eq!(request.messages[0].role, "system");
    }
    for request in &requests[3..] {
        assert_eq!(request.temperature, Some(0.9));
        assert_eq!(request.max_tokens, Some(500));
    }
}

#[tokio::test]
async fn test_failed_items_are_dropped_and_run_continues() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let provider = Arc::new(ScriptedProvider::new(vec![
        "Async functions run in parallel",
        "Optimizing a slow database query",
    ]));
    let (generator, output) = generator_for(provider.clone(), &temp_dir);

    let (report, summary) = generator.run_to_file().await.expect("run should succeed");

    assert_eq!(provider.call_count.load(Ordering::SeqCst), 5);
    assert_eq!(report.single_turn.failed(), 1);
    assert_eq!(report.multi_turn.failed(), 1);
    assert_eq!(summary.records, 3);

    let content = fs::read_to_string(&output).expect("should read file");
    assert_eq!(content.lines().count(), 3);
    assert!(!content.contains("Async/Await"));
    assert!(!content.contains("Optimizing a slow database query"));
}

#[tokio::test]
async fn test_skipping_both_phases_writes_empty_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let provider = Arc::new(ScriptedProvider::new(vec![]));
    let (generator, _) = generator_for(provider.clone(), &temp_dir);
    let output = temp_dir.path().join("empty.jsonl");
    let config = generator
        .config()
        .clone()
        .with_skip_single_turn(true)
        .with_skip_multi_turn(true)
        .with_output_path(&output);
    let generator = DatasetGenerator::new(CompletionClient::new(provider.clone(), "m"), config);

    let (report, summary) = generator.run_to_file().await.expect("run should succeed");

    assert_eq!(report.total(), 0);
    assert_eq!(summary.bytes, 0);
    assert!(output.exists());
    assert_eq!(provider.call_count.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_credential_aborts_before_any_call() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let provider = Arc::new(ScriptedProvider::new(vec![]));
    let (generator, output) = generator_for(provider.clone(), &temp_dir);
    let config = GeneratorConfig {
        api_key: String::new(),
        ..generator.config().clone()
    };
    let generator = DatasetGenerator::new(CompletionClient::new(provider.clone(), "m"), config);

    let result = generator.run_to_file().await;

    assert!(matches!(result, Err(RunError::Config(_))));
    assert_eq!(provider.call_count.load(Ordering::SeqCst), 0);
    assert!(!output.exists());
}
