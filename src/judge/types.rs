// src/judge/types.rs — Judge output records and label inputs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// A normalized verdict: always carries `score` (number or null) and
/// `reasoning` (string), plus whatever else the model or the caller added.
///
/// Keys keep insertion order: `score`, `reasoning`, the model's other keys,
/// then extra fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Normalized(Map<String, Value>);

impl Normalized {
    pub fn new(score: Option<f64>, reasoning: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("score".into(), score.map_or(Value::Null, Value::from));
        map.insert("reasoning".into(), Value::String(reasoning.into()));
        Self(map)
    }

    pub fn score(&self) -> Option<f64> {
        self.0.get("score").and_then(Value::as_f64)
    }

    /// The reasoning string, or "" when an extra field replaced it with a
    /// non-string.
    pub fn reasoning(&self) -> &str {
        self.0
            .get("reasoning")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Overlay `extra` onto the verdict. On a key collision the extra value
    /// replaces the parsed one.
    pub fn merge_extra(&mut self, extra: &Map<String, Value>) {
        for (k, v) in extra {
            self.0.insert(k.clone(), v.clone());
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// What a judge returns from every `evaluate_*` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeOutput {
    pub judge: String,
    /// Model reply exactly as received.
    pub raw: String,
    pub normalized: Normalized,
    /// Copy of `normalized.reasoning`.
    pub reasoning: String,
}

impl JudgeOutput {
    pub fn new(judge: impl Into<String>, raw: String, normalized: Normalized) -> Self {
        let reasoning = normalized.reasoning().to_string();
        Self {
            judge: judge.into(),
            raw,
            normalized,
            reasoning,
        }
    }

    pub fn score(&self) -> Option<f64> {
        self.normalized.score()
    }
}

/// Candidate labels as the caller hands them over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelInput {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for LabelInput {
    fn from(s: &str) -> Self {
        LabelInput::One(s.to_string())
    }
}

impl From<String> for LabelInput {
    fn from(s: String) -> Self {
        LabelInput::One(s)
    }
}

impl From<Vec<String>> for LabelInput {
    fn from(v: Vec<String>) -> Self {
        LabelInput::Many(v)
    }
}

impl From<Vec<&str>> for LabelInput {
    fn from(v: Vec<&str>) -> Self {
        LabelInput::Many(v.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for LabelInput {
    fn from(v: &[&str]) -> Self {
        LabelInput::Many(v.iter().map(|s| s.to_string()).collect())
    }
}

impl From<BTreeSet<String>> for LabelInput {
    fn from(set: BTreeSet<String>) -> Self {
        LabelInput::Many(set.into_iter().collect())
    }
}

impl LabelInput {
    /// Shape the candidate for the task.
    ///
    /// Multi-label: a single label becomes a one-element set. Single-label:
    /// a collection keeps only its first element and drops the rest. An
    /// empty collection has no first element and returns `None`.
    pub fn normalize(self, multi_label: bool) -> Option<CandidateLabels> {
        match (self, multi_label) {
            (LabelInput::One(label), true) => {
                Some(CandidateLabels::Multi(BTreeSet::from([label])))
            }
            (LabelInput::One(label), false) => Some(CandidateLabels::Single(label)),
            (LabelInput::Many(labels), true) => {
                Some(CandidateLabels::Multi(labels.into_iter().collect()))
            }
            (LabelInput::Many(labels), false) => {
                labels.into_iter().next().map(CandidateLabels::Single)
            }
        }
    }
}

/// Candidate after normalization. Sets are ordered so prompts are stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateLabels {
    Single(String),
    Multi(BTreeSet<String>),
}

impl CandidateLabels {
    pub fn to_value(&self) -> Value {
        match self {
            CandidateLabels::Single(label) => Value::String(label.clone()),
            CandidateLabels::Multi(labels) => {
                Value::Array(labels.iter().cloned().map(Value::String).collect())
            }
        }
    }
}
