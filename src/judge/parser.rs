// src/judge/parser.rs — Normalize free-form judge replies into a verdict

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

use super::score::coerce_score;
use super::types::Normalized;

/// Keys consumed by the structured path; everything else passes through.
const RESERVED_KEYS: [&str; 3] = ["score", "reasoning", "reason"];

fn score_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // ASCII digits only: f64 parsing rejects other scripts' digits, so a
        // Unicode `\d` would capture numbers that can never coerce.
        Regex::new(r"score[^0-9]{0,10}([0-9]{1,2}(\.[0-9]+)?)").expect("score pattern is valid")
    })
}

/// Normalize a raw model reply.
///
/// Tries the span from the first `{` to the last `}` as a JSON object. If
/// there is no such span, or it does not parse, or its reasoning is not a
/// string, falls back to scanning the text for "score ... <number>". Never
/// fails. `extra` is applied last and wins every key collision.
pub fn normalize(raw: &str, extra: &Map<String, Value>) -> Normalized {
    if let Some(mut normalized) = parse_structured(raw) {
        normalized.merge_extra(extra);
        return normalized;
    }

    tracing::warn!(
        len = raw.len(),
        "No usable JSON verdict in judge reply, falling back to text scan"
    );
    let mut normalized = parse_fallback(raw);
    normalized.merge_extra(extra);
    normalized
}

/// Greedy span from the first `{` to the last `}`. Nested or multiple
/// objects are not balanced; two sibling objects yield one unparseable span.
pub fn extract_brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Structured path. `None` means "use the fallback".
///
/// serde_json rejects numbers outside f64 range (`1e400`), so such a block
/// goes to the text scan, which reads only the leading digits.
pub(crate) fn parse_structured(raw: &str) -> Option<Normalized> {
    let blob = extract_brace_span(raw)?;
    let data: Map<String, Value> = serde_json::from_str(blob).ok()?;

    let score = data.get("score").and_then(coerce_score);
    let reasoning = match first_truthy(&data, &["reasoning", "reason"]) {
        None => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        // A reasoning that is a number, list or object is not a verdict we
        // can trust; treat the whole block as malformed.
        Some(_) => return None,
    };

    let mut normalized = Normalized::new(score, reasoning);
    for (k, v) in data {
        if !RESERVED_KEYS.contains(&k.as_str()) {
            normalized.insert(k, v);
        }
    }
    Some(normalized)
}

/// Heuristic path: the whole reply is the reasoning.
pub(crate) fn parse_fallback(raw: &str) -> Normalized {
    let lowered = raw.to_lowercase();
    let score = score_pattern()
        .captures(&lowered)
        .and_then(|caps| caps.get(1))
        .and_then(|m| coerce_score(&Value::String(m.as_str().to_string())));
    Normalized::new(score, raw.trim())
}

/// First of `keys` whose value is present and not empty, null, false or 0.
fn first_truthy<'a>(data: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|k| data.get(*k)).find(|v| is_truthy(v))
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
