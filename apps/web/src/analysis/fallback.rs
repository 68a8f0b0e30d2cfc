//! Fallback Generator — placeholder content for results the backend left empty.

use crate::analysis::sanitizer::deduplicate;
use crate::models::{EvaluationRecord, EvaluationResult};

const MAX_SUGGESTION_SKILLS: usize = 10;
const MAX_SUGGESTIONS: usize = 10;
const MAX_BULLET_SKILLS: usize = 6;
/// Job descriptions longer than this (in characters) earn the keyword hint.
const JD_HINT_MIN_CHARS: usize = 20;

const KEYWORD_ALIGNMENT_HINT: &str = "Align keywords and phrasing with job description";

/// Two templated suggestions per skill (first 10 skills), plus a keyword
/// alignment hint for non-trivial job descriptions. At most 10 entries.
pub fn fallback_suggestions(skills: &[String], job_description: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(MAX_SUGGESTION_SKILLS * 2 + 1);
    for skill in skills.iter().take(MAX_SUGGESTION_SKILLS) {
        out.push(format!("Include {skill} explicitly in resume and summary"));
        out.push(format!("Add quantified bullet highlighting {skill} impact"));
    }
    if job_description.chars().count() > JD_HINT_MIN_CHARS {
        out.push(KEYWORD_ALIGNMENT_HINT.to_string());
    }

    let mut out = deduplicate(out);
    out.truncate(MAX_SUGGESTIONS);
    out
}

/// One templated achievement bullet per skill (first 6 skills).
pub fn fallback_bullets(skills: &[String]) -> Vec<String> {
    deduplicate(
        skills
            .iter()
            .take(MAX_BULLET_SKILLS)
            .map(|skill| {
                format!("Delivered measurable outcomes using {skill}, improving KPIs and efficiency")
            })
            .collect(),
    )
}

/// A list that either came from the backend or was synthesized here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Provided(Vec<String>),
    Fallback(Vec<String>),
}

impl Resolved {
    pub fn items(&self) -> &[String] {
        match self {
            Resolved::Provided(items) | Resolved::Fallback(items) => items,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolved::Fallback(_))
    }
}

/// Everything the result view needs, with all defaults decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEvaluation {
    pub id: i64,
    pub match_percentage: i64,
    pub ats_score: i64,
    pub missing_skills: Vec<String>,
    pub suggestions: Resolved,
    pub rewritten_bullets: Resolved,
    pub job_description_chars: usize,
}

pub fn resolve(result: &EvaluationResult) -> ResolvedEvaluation {
    let suggestions = if result.suggestions.is_empty() {
        Resolved::Fallback(fallback_suggestions(
            &result.missing_skills,
            &result.job_description,
        ))
    } else {
        Resolved::Provided(result.suggestions.clone())
    };

    let rewritten_bullets = if result.rewritten_bullets.is_empty() {
        Resolved::Fallback(fallback_bullets(&result.missing_skills))
    } else {
        Resolved::Provided(result.rewritten_bullets.clone())
    };

    ResolvedEvaluation {
        id: result.id,
        match_percentage: result.match_percentage,
        ats_score: result.ats_score,
        missing_skills: result.missing_skills.clone(),
        suggestions,
        rewritten_bullets,
        job_description_chars: result.job_description.chars().count(),
    }
}

pub fn resolve_record(record: &EvaluationRecord) -> ResolvedEvaluation {
    resolve(&record.result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fallback_suggestions_two_per_skill() {
        let out = fallback_suggestions(&skills(&["Rust", "Kafka"]), "short");
        assert_eq!(
            out,
            vec![
                "Include Rust explicitly in resume and summary",
                "Add quantified bullet highlighting Rust impact",
                "Include Kafka explicitly in resume and summary",
                "Add quantified bullet highlighting Kafka impact",
            ]
        );
    }

    #[test]
    fn test_fallback_suggestions_adds_keyword_hint_for_long_jd() {
        let out = fallback_suggestions(&skills(&["Rust"]), "Senior Rust engineer, distributed systems");
        assert_eq!(out.last().map(String::as_str), Some(KEYWORD_ALIGNMENT_HINT));

        // Exactly 20 characters is not enough.
        let out = fallback_suggestions(&skills(&["Rust"]), "aaaaaaaaaaaaaaaaaaaa");
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_fallback_suggestions_capped_at_ten() {
        let many = skills(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l"]);
        let out = fallback_suggestions(&many, "a job description that is long enough");
        assert_eq!(out.len(), 10);
        assert_eq!(out[0], "Include a explicitly in resume and summary");
    }

    #[test]
    fn test_fallback_suggestions_nonempty_with_a_skill() {
        assert!(!fallback_suggestions(&skills(&["SQL"]), "").is_empty());
        assert!(fallback_suggestions(&[], "").is_empty());
    }

    #[test]
    fn test_fallback_suggestions_dedups_repeated_skills() {
        let out = fallback_suggestions(&skills(&["React", "React"]), "");
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_fallback_bullets_first_six_deduplicated() {
        let out = fallback_bullets(&skills(&["a", "b", "a", "c", "d", "e", "f", "g"]));
        assert_eq!(out.len(), 5);
        assert_eq!(
            out[0],
            "Delivered measurable outcomes using a, improving KPIs and efficiency"
        );
        assert!(!out.iter().any(|b| b.contains("using f,")));
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let s = skills(&["Go", "gRPC"]);
        assert_eq!(
            fallback_suggestions(&s, "platform engineer role"),
            fallback_suggestions(&s, "platform engineer role")
        );
        assert_eq!(fallback_bullets(&s), fallback_bullets(&s));
    }

    #[test]
    fn test_resolve_prefers_backend_content() {
        let result = EvaluationResult {
            missing_skills: skills(&["Docker"]),
            suggestions: skills(&["Mention Docker"]),
            ..Default::default()
        };
        let resolved = resolve(&result);
        assert_eq!(resolved.suggestions, Resolved::Provided(skills(&["Mention Docker"])));
        assert!(resolved.rewritten_bullets.is_fallback());
        assert_eq!(resolved.rewritten_bullets.items().len(), 1);
    }

    #[test]
    fn test_resolve_without_skills_has_empty_fallbacks() {
        let resolved = resolve(&EvaluationResult::default());
        assert!(resolved.suggestions.is_fallback());
        assert!(resolved.suggestions.items().is_empty());
        assert!(resolved.rewritten_bullets.items().is_empty());
    }
}
