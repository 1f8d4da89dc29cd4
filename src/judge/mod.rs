// src/judge/mod.rs — Judge orchestration

pub mod descriptive;
pub mod panel;
pub mod parser;
pub mod prompt;
pub mod score;
pub mod types;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::infra::config::{GenerationDefaults, JudgeConfig};
use crate::infra::errors::JudgeError;
use crate::provider::{self, GenerationSettings, LlmClient};
pub use types::{CandidateLabels, JudgeOutput, LabelInput, Normalized};

/// A named evaluator bound to one model client and fixed settings.
///
/// Holds no mutable state; one instance can serve any number of concurrent
/// evaluations as long as its client can.
#[derive(Clone)]
pub struct Judge {
    name: String,
    client: Arc<dyn LlmClient>,
    settings: GenerationSettings,
}

impl std::fmt::Debug for Judge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Judge")
            .field("name", &self.name)
            .field("client", &self.client.id())
            .field("settings", &self.settings)
            .finish()
    }
}

impl Judge {
    pub fn new(
        name: impl Into<String>,
        client: Arc<dyn LlmClient>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            name: name.into(),
            client,
            settings,
        }
    }

    /// Build a judge from a `[[judges]]` entry, constructing its provider.
    pub fn from_config(
        config: &JudgeConfig,
        defaults: &GenerationDefaults,
    ) -> Result<Self, JudgeError> {
        let client = provider::build_client(config)?;
        Ok(Self::new(config.name.clone(), client, config.settings(defaults)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn client_id(&self) -> &str {
        self.client.id()
    }

    /// Rate a free-form response to `input_text` on 0-10.
    pub async fn evaluate_generation(
        &self,
        input_text: &str,
        candidate: &str,
        guidance: Option<&str>,
        rubric: Option<&str>,
    ) -> Result<JudgeOutput, JudgeError> {
        let prompt = prompt::generation_prompt(input_text, candidate, guidance, rubric);
        self.run("generation", &prompt, Map::new()).await
    }

    /// Rate a classification decision.
    ///
    /// With `multi_label` off, a candidate collection is narrowed to its
    /// first element. The normalized candidate is echoed back under
    /// `candidate` in the verdict.
    pub async fn evaluate_classification(
        &self,
        input_text: &str,
        candidate_labels: impl Into<LabelInput>,
        allowed_labels: &[String],
        multi_label: bool,
        gold_labels: Option<&[String]>,
    ) -> Result<JudgeOutput, JudgeError> {
        let candidate = candidate_labels
            .into()
            .normalize(multi_label)
            .ok_or_else(|| {
                JudgeError::InvalidInput(
                    "single-label classification needs at least one candidate label".into(),
                )
            })?;

        let prompt = prompt::classification_prompt(
            input_text,
            &candidate,
            allowed_labels,
            multi_label,
            gold_labels,
        );

        let mut extra = Map::new();
        extra.insert("candidate".into(), candidate.to_value());
        self.run("classification", &prompt, extra).await
    }

    /// Rate a ranking of `items`. The candidate ranking is echoed back under
    /// `candidate_ranking` in the verdict.
    pub async fn evaluate_ranking(
        &self,
        items: &[String],
        candidate_ranking: &[String],
        criteria: Option<&str>,
        gold_ranking: Option<&[String]>,
    ) -> Result<JudgeOutput, JudgeError> {
        let prompt = prompt::ranking_prompt(items, candidate_ranking, criteria, gold_ranking);

        let mut extra = Map::new();
        extra.insert(
            "candidate_ranking".into(),
            Value::from(candidate_ranking.to_vec()),
        );
        self.run("ranking", &prompt, extra).await
    }

    /// One model call, then normalization. Client errors propagate as-is.
    async fn run(
        &self,
        kind: &str,
        prompt: &str,
        extra: Map<String, Value>,
    ) -> Result<JudgeOutput, JudgeError> {
        tracing::debug!(
            judge = %self.name,
            client = %self.client.id(),
            kind,
            prompt_len = prompt.len(),
            "Requesting verdict"
        );

        let raw = self.client.generate(prompt, &self.settings).await?;
        tracing::debug!(judge = %self.name, kind, response_len = raw.len(), "Verdict received");

        let normalized = parser::normalize(&raw, &extra);
        Ok(JudgeOutput::new(self.name.clone(), raw, normalized))
    }
}
