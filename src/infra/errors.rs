// src/infra/errors.rs — Error types for twelve-angry-llms

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JudgeError {
    // Transport errors (surfaced unmodified to the evaluate_* caller)
    #[error("Provider '{provider}' error: {message}")]
    Provider { provider: String, message: String },

    #[error("Rate limited by '{provider}', retry after {retry_after_ms}ms")]
    RateLimited {
        provider: String,
        retry_after_ms: u64,
    },

    // Construction errors
    #[error("No API key for '{provider}'. Set the {env_var} environment variable.")]
    MissingCredential { provider: String, env_var: String },

    #[error("Configuration error: {0}")]
    Config(String),

    // Caller errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl JudgeError {
    pub(crate) fn provider(provider: &str, message: impl Into<String>) -> Self {
        JudgeError::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// True for failures raised before any model call was made.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            JudgeError::MissingCredential { .. } | JudgeError::Config(_)
        )
    }
}
