// tests/judge_test.rs — Integration test: judge orchestration with a mock client

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;

use twelve_angry_llms::infra::errors::JudgeError;
use twelve_angry_llms::judge::{Judge, LabelInput};
use twelve_angry_llms::provider::{GenerationSettings, LlmClient};

/// Returns a canned reply and records every prompt and settings it saw.
struct MockClient {
    reply: String,
    calls: Mutex<Vec<(String, GenerationSettings)>>,
}

impl MockClient {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, GenerationSettings)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockClient {
    fn id(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, JudgeError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), settings.clone()));
        Ok(self.reply.clone())
    }
}

/// Always fails, like an unreachable provider.
struct FailingClient;

#[async_trait]
impl LlmClient for FailingClient {
    fn id(&self) -> &str {
        "failing"
    }

    async fn generate(
        &self,
        _prompt: &str,
        _settings: &GenerationSettings,
    ) -> Result<String, JudgeError> {
        Err(JudgeError::Provider {
            provider: "failing".into(),
            message: "connection refused".into(),
        })
    }
}

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn judge_with(client: Arc<MockClient>) -> Judge {
    let settings = GenerationSettings::default()
        .with_model("judge-model")
        .with_temperature(0.0);
    Judge::new("juror-8", client, settings)
}

// ─── generation ─────────────────────────────────────────────────

#[tokio::test]
async fn test_generation_structured_reply() {
    let client = MockClient::new(
        "Here you go:\n{\"score\": 9, \"reasoning\": \" Correct and concise. \"}",
    );
    let judge = judge_with(client.clone());

    let out = judge
        .evaluate_generation("What is 2+2?", "4", Some("Be strict."), None)
        .await
        .unwrap();

    assert_eq!(out.judge, "juror-8");
    assert_eq!(out.score(), Some(9.0));
    assert_eq!(out.reasoning, "Correct and concise.");
    assert_eq!(out.normalized.reasoning(), out.reasoning);
    assert_eq!(
        out.raw,
        "Here you go:\n{\"score\": 9, \"reasoning\": \" Correct and concise. \"}"
    );

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].0.contains("Task Input:\nWhat is 2+2?\n"));
    assert!(calls[0].0.contains("Guidance:\nBe strict."));
    assert_eq!(calls[0].1.model.as_deref(), Some("judge-model"));
    assert_eq!(calls[0].1.temperature, Some(0.0));
}

#[tokio::test]
async fn test_generation_prose_reply() {
    let client = MockClient::new("Score: 8 out of 10. Solid answer.");
    let out = judge_with(client)
        .evaluate_generation("Q", "A", None, None)
        .await
        .unwrap();

    assert_eq!(out.score(), Some(8.0));
    assert_eq!(out.reasoning, "Score: 8 out of 10. Solid answer.");
}

#[tokio::test]
async fn test_generation_garbage_reply_still_yields_output() {
    let client = MockClient::new("{{{ not json at all }");
    let out = judge_with(client)
        .evaluate_generation("Q", "A", None, None)
        .await
        .unwrap();

    assert_eq!(out.score(), None);
    assert_eq!(out.reasoning, "{{{ not json at all }");
}

#[tokio::test]
async fn test_generation_output_serializes() {
    let client = MockClient::new(r#"{"score": 70, "reasoning": "ok"}"#);
    let out = judge_with(client)
        .evaluate_generation("Q", "A", None, None)
        .await
        .unwrap();

    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(
        value,
        json!({
            "judge": "juror-8",
            "raw": "{\"score\": 70, \"reasoning\": \"ok\"}",
            "normalized": { "score": 7.0, "reasoning": "ok" },
            "reasoning": "ok"
        })
    );
}

// ─── classification ─────────────────────────────────────────────

#[tokio::test]
async fn test_classification_single_label_narrows_collection() {
    let client = MockClient::new(r#"{"score": 10, "reasoning": "right", "valid": true}"#);
    let out = judge_with(client.clone())
        .evaluate_classification(
            "The cat sat.",
            vec!["cat", "dog"],
            &strings(&["cat", "dog"]),
            false,
            None,
        )
        .await
        .unwrap();

    assert_eq!(out.normalized.get("candidate"), Some(&json!("cat")));
    assert_eq!(out.normalized.get("valid"), Some(&json!(true)));
    assert!(client.calls()[0].0.contains("Candidate Prediction: cat\n"));
}

#[tokio::test]
async fn test_classification_multi_label_wraps_single() {
    let client = MockClient::new(r#"{"score": 6, "reasoning": "partial"}"#);
    let out = judge_with(client.clone())
        .evaluate_classification(
            "text",
            "cat",
            &strings(&["cat", "dog"]),
            true,
            Some(&strings(&["cat", "dog"])),
        )
        .await
        .unwrap();

    assert_eq!(out.normalized.get("candidate"), Some(&json!(["cat"])));
    let prompt = &client.calls()[0].0;
    assert!(prompt.contains("Multi-label: true"));
    assert!(prompt.contains("Gold Label(s): [\"cat\",\"dog\"]"));
}

#[tokio::test]
async fn test_classification_candidate_overrides_model_echo() {
    let client = MockClient::new(r#"{"score": 2, "reasoning": "wrong", "candidate": "bird"}"#);
    let out = judge_with(client)
        .evaluate_classification("t", "dog", &strings(&["cat", "dog"]), false, None)
        .await
        .unwrap();

    assert_eq!(out.normalized.get("candidate"), Some(&json!("dog")));
}

#[tokio::test]
async fn test_classification_candidate_survives_fallback() {
    let client = MockClient::new("I cannot decide.");
    let out = judge_with(client)
        .evaluate_classification("t", "dog", &strings(&["cat", "dog"]), false, None)
        .await
        .unwrap();

    assert_eq!(out.score(), None);
    assert_eq!(out.normalized.get("candidate"), Some(&json!("dog")));
}

#[tokio::test]
async fn test_classification_empty_single_label_is_invalid_input() {
    let client = MockClient::new("{}");
    let err = judge_with(client.clone())
        .evaluate_classification(
            "t",
            LabelInput::Many(vec![]),
            &strings(&["cat"]),
            false,
            None,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, JudgeError::InvalidInput(_)));
    assert!(client.calls().is_empty());
}

// ─── ranking ────────────────────────────────────────────────────

#[tokio::test]
async fn test_ranking_echoes_candidate_ranking() {
    let client = MockClient::new(r#"{"score": "7.25", "reasoning": "plausible"}"#);
    let out = judge_with(client.clone())
        .evaluate_ranking(
            &strings(&["b", "c", "a"]),
            &strings(&["a", "b", "c"]),
            Some("alphabetical"),
            None,
        )
        .await
        .unwrap();

    assert_eq!(out.score(), Some(7.25));
    assert_eq!(
        out.normalized.get("candidate_ranking"),
        Some(&json!(["a", "b", "c"]))
    );
    let prompt = &client.calls()[0].0;
    assert!(prompt.contains("Items (unordered set): [\"b\",\"c\",\"a\"]"));
    assert!(prompt.contains("Criteria: alphabetical"));
}

// ─── descriptive ────────────────────────────────────────────────

#[tokio::test]
async fn test_describe_returns_raw_text() {
    let client = MockClient::new("  A thoughtful answer. Score: 9  ");
    let result = judge_with(client.clone())
        .describe("Paris", Some("Paris"), None)
        .await
        .unwrap();

    assert_eq!(result.judge, "juror-8");
    assert_eq!(result.evaluation, "  A thoughtful answer. Score: 9  ");
    assert_eq!(
        client.calls()[0].0,
        "Please evaluate the following generation. Reference: Paris. Generation: Paris"
    );
}

// ─── failures and reuse ─────────────────────────────────────────

#[tokio::test]
async fn test_client_failure_propagates() {
    let judge = Judge::new("broken", Arc::new(FailingClient), GenerationSettings::default());
    let err = judge
        .evaluate_generation("Q", "A", None, None)
        .await
        .unwrap_err();

    match err {
        JudgeError::Provider { provider, message } => {
            assert_eq!(provider, "failing");
            assert_eq!(message, "connection refused");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_one_call_per_evaluation_and_concurrent_reuse() {
    let client = MockClient::new(r#"{"score": 5, "reasoning": "fine"}"#);
    let judge = judge_with(client.clone());

    let xs = strings(&["x"]);
    let (a, b, c) = tokio::join!(
        judge.evaluate_generation("Q1", "A1", None, None),
        judge.evaluate_ranking(&xs, &xs, None, None),
        judge.evaluate_classification("t", "x", &xs, false, None),
    );
    assert_eq!(a.unwrap().score(), Some(5.0));
    assert_eq!(b.unwrap().score(), Some(5.0));
    assert_eq!(c.unwrap().score(), Some(5.0));
    assert_eq!(client.calls().len(), 3);
}

#[tokio::test]
async fn test_prompts_are_byte_identical_across_calls() {
    let client = MockClient::new("score 5");
    let judge = judge_with(client.clone());
    for _ in 0..2 {
        judge
            .evaluate_generation("Q", "A", Some("g"), Some("r"))
            .await
            .unwrap();
    }
    let calls = client.calls();
    assert_eq!(calls[0].0, calls[1].0);
}
