use chrono::{DateTime, Utc};
use serde_json::{json, Value};

/// A fully-defaulted analysis result, safe to render.
///
/// Has no `Deserialize` impl. Backend bodies become one only through
/// `analysis::sanitizer::normalize`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationResult {
    pub id: i64,
    pub match_percentage: i64,
    pub ats_score: i64,
    pub missing_skills: Vec<String>,
    pub suggestions: Vec<String>,
    pub rewritten_bullets: Vec<String>,
    pub resume_text: String,
    pub job_description: String,
}

/// One entry of the backend's evaluation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRecord {
    pub result: EvaluationResult,
    pub created_at: Option<DateTime<Utc>>,
}

/// An untrusted response body. Any field may be missing or wrong-typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnknownPayload(Value);

impl UnknownPayload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Looks up a top-level field; `None` when absent or when the payload
    /// is not an object.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.as_object().and_then(|map| map.get(key))
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// Compact JSON text of the payload.
    pub fn to_json(&self) -> String {
        self.0.to_string()
    }

    /// Splits an array payload into its elements. Anything else yields nothing.
    pub fn into_items(self) -> Vec<UnknownPayload> {
        match self.0 {
            Value::Array(items) => items.into_iter().map(UnknownPayload).collect(),
            _ => Vec::new(),
        }
    }
}

/// Re-encodes a result in the backend's wire shape. The analysis page uses
/// this to carry the last result through its form.
impl From<&EvaluationResult> for UnknownPayload {
    fn from(result: &EvaluationResult) -> Self {
        Self(json!({
            "id": result.id,
            "matchPercentage": result.match_percentage,
            "atsScore": result.ats_score,
            "missingSkills": result.missing_skills,
            "suggestions": result.suggestions,
            "rewrittenBullets": result.rewritten_bullets,
            "resumeText": result.resume_text,
            "jobDescription": result.job_description,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_on_non_object_is_none() {
        let payload = UnknownPayload::new(json!(["matchPercentage"]));
        assert!(payload.field("matchPercentage").is_none());
    }

    #[test]
    fn test_into_items_of_object_is_empty() {
        let payload = UnknownPayload::new(json!({"id": 1}));
        assert!(payload.into_items().is_empty());
    }

    #[test]
    fn test_result_reencodes_with_wire_names() {
        let result = EvaluationResult {
            id: 7,
            match_percentage: 42,
            ..Default::default()
        };
        let payload = UnknownPayload::from(&result);
        assert_eq!(payload.field("matchPercentage"), Some(&json!(42)));
        assert_eq!(payload.field("rewrittenBullets"), Some(&json!([])));
        assert!(payload.to_json().contains(r#""matchPercentage":42"#));
    }
}
