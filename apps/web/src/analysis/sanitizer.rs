//! Sanitizer — coerces untrusted backend bodies into well-formed results.
//!
//! Nothing in here fails or panics: every malformed field collapses to its
//! default.

use chrono::{DateTime, Utc};
use serde_json::{Number, Value};

use crate::models::{EvaluationRecord, EvaluationResult, UnknownPayload};

/// Rounds half up and clamps into [0,100]. NaN and infinities map to 0.
pub fn clamp_number(x: f64) -> i64 {
    if !x.is_finite() {
        return 0;
    }
    (x + 0.5).floor().clamp(0.0, 100.0) as i64
}

/// Percentage coercion for an arbitrary JSON value. Non-numbers map to 0.
pub fn clamp_percentage(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().map(clamp_number).unwrap_or(0),
        _ => 0,
    }
}

/// Coerces a list-shaped value into trimmed, non-empty strings.
/// Non-arrays yield an empty list; `null` elements read as `"null"`.
pub fn normalize_string_list(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .map(element_text)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Removes later duplicates, keeping first-seen order.
pub fn deduplicate(list: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(list.len());
    for item in list {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Builds an `EvaluationResult` from any payload.
///
/// `missing_skills` and `rewritten_bullets` are filtered only; `suggestions`
/// is filtered and deduplicated. Normalizing an already-normalized result
/// (re-encoded through `UnknownPayload::from`) returns it unchanged.
pub fn normalize(raw: &UnknownPayload) -> EvaluationResult {
    EvaluationResult {
        id: coerce_id(raw.field("id")),
        match_percentage: clamp_percentage(raw.field("matchPercentage")),
        ats_score: clamp_percentage(raw.field("atsScore")),
        missing_skills: normalize_string_list(raw.field("missingSkills")),
        suggestions: deduplicate(normalize_string_list(raw.field("suggestions"))),
        rewritten_bullets: normalize_string_list(raw.field("rewrittenBullets")),
        resume_text: coerce_text(raw.field("resumeText")),
        job_description: coerce_text(raw.field("jobDescription")),
    }
}

/// Normalizes one history entry, keeping `createdAt` when it is a valid
/// RFC 3339 string or an epoch-seconds number.
pub fn normalize_record(raw: &UnknownPayload) -> EvaluationRecord {
    EvaluationRecord {
        result: normalize(raw),
        created_at: coerce_timestamp(raw.field("createdAt")),
    }
}

/// Normalizes a history listing. A non-array body is an empty history.
pub fn normalize_history(raw: UnknownPayload) -> Vec<EvaluationRecord> {
    raw.into_items()
        .iter()
        .filter(|item| !item.is_null())
        .map(normalize_record)
        .collect()
}

fn element_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        other => other.to_string(),
    }
}

// Integral floats print without a fractional part ("5", not "5.0").
fn number_text(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                return (f as i64).to_string();
            }
        }
    }
    n.to_string()
}

fn coerce_id(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| finite(n.as_f64()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| finite(s.parse::<f64>().ok()).map(|f| f.trunc() as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn coerce_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => number_text(n),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn coerce_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Some(Value::Number(n)) => {
            let secs = finite(n.as_f64())?;
            let whole = secs.floor();
            let nanos = ((secs - whole) * 1e9) as u32;
            DateTime::from_timestamp(whole as i64, nanos)
        }
        _ => None,
    }
}

fn finite(x: Option<f64>) -> Option<f64> {
    x.filter(|f| f.is_finite())
}
