// src/judge/panel.rs — Several judges, one verdict

use futures::future::{join_all, BoxFuture};
use serde::{Deserialize, Serialize};

use super::descriptive::DescriptiveResult;
use super::score::mean_score;
use super::{Judge, JudgeOutput, LabelInput};
use crate::infra::config::Config;
use crate::infra::errors::JudgeError;

/// Combined result of one panel evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelVerdict {
    /// One output per judge, in panel order.
    pub outputs: Vec<JudgeOutput>,
    /// Mean of the scores that were present.
    pub mean_score: Option<f64>,
    /// How many judges produced a score.
    pub scored: usize,
}

impl PanelVerdict {
    pub fn from_outputs(outputs: Vec<JudgeOutput>) -> Self {
        let scored = outputs.iter().filter(|o| o.score().is_some()).count();
        let mean_score = mean_score(outputs.iter().map(JudgeOutput::score));
        Self {
            outputs,
            mean_score,
            scored,
        }
    }
}

/// Independent judges evaluated concurrently on identical inputs.
#[derive(Debug, Clone)]
pub struct Panel {
    judges: Vec<Judge>,
}

impl Panel {
    pub fn new(judges: Vec<Judge>) -> Result<Self, JudgeError> {
        if judges.is_empty() {
            return Err(JudgeError::Config("a panel needs at least one judge".into()));
        }
        Ok(Self { judges })
    }

    /// Build every configured judge. Fails on the first construction error.
    pub fn from_config(config: &Config) -> Result<Self, JudgeError> {
        let judges = config
            .panel()
            .iter()
            .map(|jc| Judge::from_config(jc, &config.generation))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(judges)
    }

    pub fn judges(&self) -> &[Judge] {
        &self.judges
    }

    pub fn len(&self) -> usize {
        self.judges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.judges.is_empty()
    }

    pub async fn evaluate_generation(
        &self,
        input_text: &str,
        candidate: &str,
        guidance: Option<&str>,
        rubric: Option<&str>,
    ) -> Result<PanelVerdict, JudgeError> {
        self.collect(|judge| {
            Box::pin(judge.evaluate_generation(input_text, candidate, guidance, rubric))
        })
        .await
    }

    pub async fn evaluate_classification(
        &self,
        input_text: &str,
        candidate_labels: LabelInput,
        allowed_labels: &[String],
        multi_label: bool,
        gold_labels: Option<&[String]>,
    ) -> Result<PanelVerdict, JudgeError> {
        self.collect(|judge| {
            Box::pin(judge.evaluate_classification(
                input_text,
                candidate_labels.clone(),
                allowed_labels,
                multi_label,
                gold_labels,
            ))
        })
        .await
    }

    pub async fn evaluate_ranking(
        &self,
        items: &[String],
        candidate_ranking: &[String],
        criteria: Option<&str>,
        gold_ranking: Option<&[String]>,
    ) -> Result<PanelVerdict, JudgeError> {
        self.collect(|judge| {
            Box::pin(judge.evaluate_ranking(items, candidate_ranking, criteria, gold_ranking))
        })
        .await
    }

    pub async fn describe(
        &self,
        generation: &str,
        reference: Option<&str>,
        context: Option<&str>,
    ) -> Result<Vec<DescriptiveResult>, JudgeError> {
        join_all(
            self.judges
                .iter()
                .map(|judge| judge.describe(generation, reference, context)),
        )
        .await
        .into_iter()
        .collect()
    }

    /// Run `eval` on every judge at once. Any client failure fails the
    /// whole panel call.
    async fn collect<'a, F>(&'a self, eval: F) -> Result<PanelVerdict, JudgeError>
    where
        F: Fn(&'a Judge) -> BoxFuture<'a, Result<JudgeOutput, JudgeError>>,
    {
        let results = join_all(self.judges.iter().map(eval)).await;
        let outputs = results.into_iter().collect::<Result<Vec<_>, _>>()?;

        let verdict = PanelVerdict::from_outputs(outputs);
        tracing::debug!(
            judges = self.judges.len(),
            scored = verdict.scored,
            mean = ?verdict.mean_score,
            "Panel verdict"
        );
        Ok(verdict)
    }
}
