// src/judge/descriptive.rs — Pass-through descriptive evaluation

use serde::{Deserialize, Serialize};

use super::{prompt, Judge};
use crate::infra::errors::JudgeError;

/// A prose evaluation, returned exactly as the model wrote it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveResult {
    pub judge: String,
    pub evaluation: String,
}

impl Judge {
    /// Ask for a free-text evaluation of `generation`. No scoring, no
    /// normalization.
    pub async fn describe(
        &self,
        generation: &str,
        reference: Option<&str>,
        context: Option<&str>,
    ) -> Result<DescriptiveResult, JudgeError> {
        let prompt = prompt::descriptive_prompt(generation, reference, context);
        tracing::debug!(judge = %self.name(), kind = "descriptive", "Requesting evaluation");

        let evaluation = self.client.generate(&prompt, &self.settings).await?;

        Ok(DescriptiveResult {
            judge: self.name().to_string(),
            evaluation,
        })
    }
}
