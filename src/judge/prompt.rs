// src/judge/prompt.rs — Evaluation prompt builders
//
// Every builder is a pure function of its inputs. Optional sections that are
// absent or empty are left out entirely.

use serde_json::Value;

use super::types::CandidateLabels;

/// Render an ordered sequence as a JSON array literal.
fn render_list(items: &[String]) -> String {
    Value::from(items.to_vec()).to_string()
}

fn present(opt: Option<&str>) -> Option<&str> {
    opt.filter(|s| !s.is_empty())
}

fn present_list(opt: Option<&[String]>) -> Option<&[String]> {
    opt.filter(|l| !l.is_empty())
}

/// Prompt for open-ended generation quality.
pub fn generation_prompt(
    input_text: &str,
    candidate: &str,
    guidance: Option<&str>,
    rubric: Option<&str>,
) -> String {
    let guidance_part = present(guidance)
        .map(|g| format!("\nGuidance:\n{}", g))
        .unwrap_or_default();
    let rubric_part = present(rubric)
        .map(|r| format!("\nRubric (use to justify score):\n{}", r))
        .unwrap_or_default();

    format!(
        "You are an impartial evaluator of a model's response.\n\
         Task Input:\n\
         {input_text}\n\
         {guidance_part}\
         \nCandidate Response:\n\
         {candidate}\n\
         {rubric_part}\n\
         Provide:\n\
         1. A score 0-10 (higher is better)\n\
         2. A concise reasoning\n\
         Respond in JSON with keys: score, reasoning.\n"
    )
}

/// Prompt for classification correctness.
pub fn classification_prompt(
    input_text: &str,
    candidate: &CandidateLabels,
    allowed: &[String],
    multi_label: bool,
    gold: Option<&[String]>,
) -> String {
    let gold_part = present_list(gold)
        .map(|g| format!("\nGold Label(s): {}", render_list(g)))
        .unwrap_or_default();
    let candidate_display = match candidate {
        CandidateLabels::Single(label) => label.clone(),
        CandidateLabels::Multi(_) => candidate.to_value().to_string(),
    };

    format!(
        "You are evaluating a classification decision.\n\
         Input Text:\n{input_text}\n\
         Allowed Labels: {allowed}\n\
         Multi-label: {multi_label}\n\
         Candidate Prediction: {candidate_display}\
         {gold_part}\n\
         Assess correctness (if gold provided) and label suitability. Return JSON:\n\
         {{ \"score\": <0-10>, \"reasoning\": \"...\", \"valid\": <true|false> }}\n",
        allowed = render_list(allowed),
    )
}

/// Prompt for ranking quality. Items are labelled as an unordered set so
/// the model does not read their order as a ranking.
pub fn ranking_prompt(
    items: &[String],
    candidate: &[String],
    criteria: Option<&str>,
    gold: Option<&[String]>,
) -> String {
    let criteria_part = present(criteria)
        .map(|c| format!("Criteria: {}\n", c))
        .unwrap_or_default();
    let gold_part = present_list(gold)
        .map(|g| format!("Gold Ranking (best first): {}\n", render_list(g)))
        .unwrap_or_default();

    format!(
        "Evaluate a provided ranking of items.\n\
         {criteria_part}\
         Items (unordered set): {items}\n\
         Candidate Ranking (best first): {candidate}\n\
         {gold_part}\
         Judge coherence, adherence to criteria (if any), and plausibility.\n\
         Return JSON: {{ \"score\": 0-10, \"reasoning\": \"...\" }}\n",
        items = render_list(items),
        candidate = render_list(candidate),
    )
}

/// Prompt for the descriptive judge. The reply is returned as-is.
pub fn descriptive_prompt(
    generation: &str,
    reference: Option<&str>,
    context: Option<&str>,
) -> String {
    let mut prompt = String::from("Please evaluate the following generation. ");
    if let Some(context) = present(context) {
        prompt.push_str(&format!("Context: {}. ", context));
    }
    if let Some(reference) = present(reference) {
        prompt.push_str(&format!("Reference: {}. ", reference));
    }
    prompt.push_str(&format!("Generation: {}", generation));
    prompt
}
