// src/provider/anthropic.rs — Anthropic Messages API provider

use async_trait::async_trait;

use super::openai::read_key;
use super::{check_status, transport_error, GenerationSettings, LlmClient};
use crate::infra::errors::JudgeError;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

pub struct AnthropicProvider {
    api_key: String,
    client: reqwest::Client,
}

impl AnthropicProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_env(env_var: &str) -> Result<Self, JudgeError> {
        Ok(Self::new(read_key(env_var, "anthropic")?))
    }

    fn api_url(&self) -> &str {
        "https://api.anthropic.com/v1/messages"
    }

    pub fn build_request_body(prompt: &str, settings: &GenerationSettings) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": settings.model_or(DEFAULT_MODEL),
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": settings.max_tokens.unwrap_or(1024),
        });

        if let Some(system) = &settings.system {
            body["system"] = serde_json::json!(system);
        }
        if let Some(temp) = settings.temperature {
            body["temperature"] = serde_json::json!(temp);
        }
        settings.apply_extra(&mut body);
        body
    }

    /// Concatenate every text block of the reply.
    pub fn extract_content(resp: &serde_json::Value) -> String {
        resp["content"]
            .as_array()
            .map(|blocks| {
                blocks
                    .iter()
                    .filter(|c| c["type"] == "text")
                    .map(|c| c["text"].as_str().unwrap_or(""))
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for AnthropicProvider {
    fn id(&self) -> &str {
        "anthropic"
    }

    async fn generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, JudgeError> {
        let body = Self::build_request_body(prompt, settings);

        let response = self
            .client
            .post(self.api_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error("anthropic", e))?;

        let response = check_status("anthropic", response).await?;

        let resp: serde_json::Value = response.json().await.map_err(|e| {
            JudgeError::provider("anthropic", format!("Failed to parse response: {}", e))
        })?;

        Ok(Self::extract_content(&resp))
    }
}
