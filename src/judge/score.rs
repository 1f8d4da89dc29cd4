// src/judge/score.rs — Score coercion onto the 0-10 scale

use serde_json::Value;

/// Round to 2 decimal places. Exact ties go to the even neighbour, so
/// 7.125 becomes 7.12.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round_ties_even() / 100.0
}

/// Coerce whatever the model reported as a score onto 0-10.
///
/// Numbers and numeric strings are accepted, and booleans count as 1 and 0.
/// Arrays, objects and null yield `None`.
pub fn coerce_score(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().and_then(coerce_f64),
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(coerce_f64),
        Value::Bool(b) => coerce_f64(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Numeric core of [`coerce_score`].
///
/// - negative clamps to 0
/// - (10, 100] is read as a percentage and divided by 10
/// - above 100 clamps to 10
/// - NaN has no place on the scale and yields `None`
pub fn coerce_f64(f: f64) -> Option<f64> {
    if f.is_nan() {
        return None;
    }
    if f < 0.0 {
        return Some(0.0);
    }
    if f > 10.0 && f <= 100.0 {
        return Some(round2(f / 10.0));
    }
    if f > 10.0 {
        return Some(10.0);
    }
    Some(round2(f))
}

/// Mean of the present scores, rounded. `None` when nothing scored.
pub fn mean_score<I>(scores: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, n) = scores
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, n), s| (sum + s, n + 1));
    if n == 0 {
        None
    } else {
        Some(round2(sum / n as f64))
    }
}
