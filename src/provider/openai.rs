// src/provider/openai.rs — OpenAI Chat Completions provider

use async_trait::async_trait;

use super::{check_status, transport_error, GenerationSettings, LlmClient};
use crate::infra::errors::JudgeError;

pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

pub struct OpenAIProvider {
    id: String,
    api_key: String,
    client: reqwest::Client,
    base_url: String,
}

impl OpenAIProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            id: "openai".into(),
            api_key,
            client: reqwest::Client::new(),
            base_url: "https://api.openai.com/v1".into(),
        }
    }

    /// Any endpoint speaking the Chat Completions wire format.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            id: "openai_compat".into(),
            api_key,
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Read the key from `env_var`. A missing or blank key is a
    /// construction-time error.
    pub fn from_env(env_var: &str) -> Result<Self, JudgeError> {
        Ok(Self::new(read_key(env_var, "openai")?))
    }

    pub fn build_request_body(prompt: &str, settings: &GenerationSettings) -> serde_json::Value {
        let mut messages = Vec::new();
        if let Some(system) = &settings.system {
            messages.push(serde_json::json!({ "role": "system", "content": system }));
        }
        messages.push(serde_json::json!({ "role": "user", "content": prompt }));

        let mut body = serde_json::json!({
            "model": settings.model_or(DEFAULT_MODEL),
            "messages": messages,
        });

        if let Some(max_tokens) = settings.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }
        if let Some(temp) = settings.temperature {
            body["temperature"] = serde_json::json!(temp);
        }
        settings.apply_extra(&mut body);
        body
    }

    /// Pull the assistant text out of a Chat Completions response. A null or
    /// missing content field becomes the empty string.
    pub fn extract_content(resp: &serde_json::Value) -> String {
        resp["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string()
    }
}

impl OpenAIProvider {
    /// Keyless compat servers get no Authorization header at all.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.is_empty() {
            request
        } else {
            request.header("Authorization", format!("Bearer {}", self.api_key))
        }
    }
}

pub(crate) fn read_key(env_var: &str, provider: &str) -> Result<String, JudgeError> {
    match std::env::var(env_var) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(JudgeError::MissingCredential {
            provider: provider.into(),
            env_var: env_var.into(),
        }),
    }
}

#[async_trait]
impl LlmClient for OpenAIProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, JudgeError> {
        let body = Self::build_request_body(prompt, settings);

        let response = self
            .authorize(self.client.post(format!("{}/chat/completions", self.base_url)))
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(&self.id, e))?;

        let response = check_status(&self.id, response).await?;

        let resp: serde_json::Value = response
            .json()
            .await
            .map_err(|e| JudgeError::provider(&self.id, format!("Failed to parse response: {}", e)))?;

        Ok(Self::extract_content(&resp))
    }
}
