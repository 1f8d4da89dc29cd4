// src/provider/resolver.rs — Build a client from a judge's config entry

use std::sync::Arc;

use super::anthropic::AnthropicProvider;
use super::ollama::OllamaProvider;
use super::openai::{read_key, OpenAIProvider};
use super::LlmClient;
use crate::infra::config::{JudgeConfig, ProviderKind};
use crate::infra::errors::JudgeError;

/// Construct the provider named by `judge.provider`. Credentials are read
/// here, so a missing key fails before any evaluation starts.
pub fn build_client(judge: &JudgeConfig) -> Result<Arc<dyn LlmClient>, JudgeError> {
    let key_env = judge.api_key_env();
    let client: Arc<dyn LlmClient> = match judge.provider {
        ProviderKind::Openai => {
            let env = key_env.as_deref().unwrap_or("OPENAI_API_KEY");
            match &judge.base_url {
                Some(url) => Arc::new(OpenAIProvider::with_base_url(
                    read_key(env, "openai")?,
                    url.clone(),
                )),
                None => Arc::new(OpenAIProvider::from_env(env)?),
            }
        }
        ProviderKind::OpenaiCompat => {
            let url = judge.base_url.clone().ok_or_else(|| {
                JudgeError::Config(format!(
                    "judge '{}' uses openai_compat but has no base_url",
                    judge.name
                ))
            })?;
            // Local compat servers often take no key at all.
            let key = key_env
                .as_deref()
                .and_then(|env| std::env::var(env).ok())
                .unwrap_or_default();
            Arc::new(OpenAIProvider::with_base_url(key, url))
        }
        ProviderKind::Anthropic => {
            let env = key_env.as_deref().unwrap_or("ANTHROPIC_API_KEY");
            Arc::new(AnthropicProvider::from_env(env)?)
        }
        ProviderKind::Ollama => Arc::new(OllamaProvider::new(judge.base_url.clone())),
    };

    tracing::debug!(judge = %judge.name, provider = %client.id(), "Client constructed");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_ollama_needs_no_key() {
        let client = build_client(&JudgeConfig::new("local", ProviderKind::Ollama)).unwrap();
        assert_eq!(client.id(), "ollama");
    }

    #[test]
    fn test_build_compat_without_url_is_config_error() {
        let err = build_client(&JudgeConfig::new("c", ProviderKind::OpenaiCompat))
            .err()
            .unwrap();
        assert!(matches!(err, JudgeError::Config(_)));
    }

    #[test]
    fn test_build_compat_with_url() {
        let mut judge = JudgeConfig::new("c", ProviderKind::OpenaiCompat);
        judge.base_url = Some("http://localhost:8000/v1".into());
        judge.api_key_env = Some("TAL_TEST_UNSET_COMPAT_KEY".into());
        let client = build_client(&judge).unwrap();
        assert_eq!(client.id(), "openai_compat");
    }

    #[test]
    fn test_build_missing_credential() {
        let mut judge = JudgeConfig::new("a", ProviderKind::Anthropic);
        judge.api_key_env = Some("TAL_TEST_UNSET_ANTHROPIC_KEY".into());
        let err = build_client(&judge).err().unwrap();
        assert!(matches!(
            err,
            JudgeError::MissingCredential { ref env_var, .. } if env_var == "TAL_TEST_UNSET_ANTHROPIC_KEY"
        ));
    }
}
