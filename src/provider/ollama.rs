// src/provider/ollama.rs — Ollama local model provider

use async_trait::async_trait;

use super::{check_status, transport_error, GenerationSettings, LlmClient};
use crate::infra::errors::JudgeError;

pub const DEFAULT_MODEL: &str = "llama3.3";

pub struct OllamaProvider {
    base_url: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url
                .unwrap_or_else(|| "http://localhost:11434".into())
                .trim_end_matches('/')
                .to_string(),
            client: reqwest::Client::new(),
        }
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
            "stream": false,
        });

        let mut options = serde_json::Map::new();
        if let Some(temp) = settings.temperature {
            options.insert("temperature".into(), serde_json::json!(temp));
        }
        if let Some(max_tokens) = settings.max_tokens {
            options.insert("num_predict".into(), serde_json::json!(max_tokens));
        }
        if !options.is_empty() {
            body["options"] = serde_json::Value::Object(options);
        }
        settings.apply_extra(&mut body);
        body
    }
}

impl Default for OllamaProvider {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl LlmClient for OllamaProvider {
    fn id(&self) -> &str {
        "ollama"
    }

    async fn generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, JudgeError> {
        let body = Self::build_request_body(prompt, settings);

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error("ollama", e))?;

        let response = check_status("ollama", response).await?;

        let resp: serde_json::Value = response
            .json()
            .await
            .map_err(|e| JudgeError::provider("ollama", format!("Invalid Ollama response: {}", e)))?;

        Ok(resp["message"]["content"].as_str().unwrap_or("").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(OllamaProvider::default().base_url, "http://localhost:11434");
    }

    #[test]
    fn test_body_not_streaming() {
        let body = OllamaProvider::build_request_body("p", &GenerationSettings::default());
        assert_eq!(body["stream"], false);
        assert_eq!(body["model"], DEFAULT_MODEL);
        assert!(body.get("options").is_none());
    }

    #[test]
    fn test_body_options() {
        let mut settings = GenerationSettings::default().with_temperature(0.1);
        settings.max_tokens = Some(200);
        let body = OllamaProvider::build_request_body("p", &settings);
        assert_eq!(body["options"]["num_predict"], 200);
        assert!(body["options"]["temperature"].is_number());
    }
}
