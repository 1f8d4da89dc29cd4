// src/provider/mod.rs — LLM client capability

pub mod anthropic;
pub mod ollama;
pub mod openai;
pub mod resolver;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::infra::errors::JudgeError;

pub use resolver::build_client;

/// The one capability a judge needs from a model: prompt in, text out.
///
/// Implementations must be safe to call concurrently; a single client is
/// shared by every evaluation a judge runs. Failures are returned, never
/// swallowed, and no retry happens at this layer.
#[async_trait]
pub trait LlmClient: Send + Sync {
    fn id(&self) -> &str;

    async fn generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, JudgeError>;
}

/// Per-judge generation settings, passed through to every `generate` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Provider-specific request fields, copied into the body as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl GenerationSettings {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn model_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.model.as_deref().unwrap_or(default)
    }

    /// Copy `extra` into a request body without clobbering fields the
    /// provider already set.
    pub(crate) fn apply_extra(&self, body: &mut serde_json::Value) {
        if let Some(obj) = body.as_object_mut() {
            for (k, v) in &self.extra {
                obj.entry(k.clone()).or_insert_with(|| v.clone());
            }
        }
    }
}

/// Map a reqwest send failure onto the crate error.
pub(crate) fn transport_error(provider: &str, e: reqwest::Error) -> JudgeError {
    JudgeError::provider(provider, e.to_string())
}

/// `Retry-After` seconds as milliseconds, 5000 when absent or unreadable.
pub(crate) fn retry_after_ms(headers: &reqwest::header::HeaderMap) -> u64 {
    headers
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(|secs| secs.saturating_mul(1000))
        .unwrap_or(5000)
}

/// Shared status handling for every HTTP provider.
pub(crate) async fn check_status(
    provider: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, JudgeError> {
    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(JudgeError::RateLimited {
            provider: provider.into(),
            retry_after_ms: retry_after_ms(response.headers()),
        });
    }

    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        return Err(JudgeError::provider(
            provider,
            format!("HTTP {}: {}", status, error_body),
        ));
    }

    Ok(response)
}
