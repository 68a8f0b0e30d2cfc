//! Analysis form state and the submission gate.

use axum::{
    extract::multipart::{Field, Multipart, MultipartError},
    http::StatusCode,
};
use bytes::Bytes;
use serde_json::Value;
use tracing::debug;

use crate::analysis::sanitizer::normalize;
use crate::errors::AppError;
use crate::models::{EvaluationResult, UnknownPayload};

/// Which resume input tab is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResumeTab {
    #[default]
    Upload,
    Paste,
}

impl ResumeTab {
    pub fn as_str(self) -> &'static str {
        match self {
            ResumeTab::Upload => "upload",
            ResumeTab::Paste => "paste",
        }
    }

    fn parse(raw: &str) -> Self {
        match raw.trim() {
            "paste" => ResumeTab::Paste,
            _ => ResumeTab::Upload,
        }
    }
}

/// An uploaded resume file, held in memory for the duration of one request.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Current inputs of the analysis page.
#[derive(Debug, Clone, Default)]
pub struct AnalysisForm {
    pub resume_file: Option<ResumeFile>,
    pub resume_text: String,
    pub job_description: String,
    pub tab: ResumeTab,
    /// The last result shown on the page, carried through the form so a
    /// failed resubmission leaves it visible.
    pub previous_result: Option<EvaluationResult>,
}

impl AnalysisForm {
    /// Reads the multipart body posted by the analysis page.
    ///
    /// Browsers send an empty part with an empty filename when no file was
    /// chosen; that counts as no file.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = AnalysisForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| rejected(e, "Malformed form submission"))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "resumeFile" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| rejected(e, "Could not read uploaded file"))?;
                    if !file_name.is_empty() && !bytes.is_empty() {
                        form.resume_file = Some(ResumeFile {
                            file_name,
                            content_type,
                            bytes,
                        });
                    }
                }
                "resumeText" => form.resume_text = read_text(field).await?,
                "jobDescription" => form.job_description = read_text(field).await?,
                "tab" => form.tab = ResumeTab::parse(&read_text(field).await?),
                "previousResult" => form.previous_result = carried_result(&read_text(field).await?),
                other => debug!("Ignoring unexpected form field '{other}'"),
            }
        }

        Ok(form)
    }

    /// True when the pasted resume text has non-whitespace content.
    pub fn has_resume_text(&self) -> bool {
        !self.resume_text.trim().is_empty()
    }

    /// A resume source (file or pasted text) and a job description are both
    /// present. The page script keeps the submit control disabled until this
    /// holds, and the server re-checks it on every post.
    pub fn ready(&self) -> bool {
        (self.resume_file.is_some() || self.has_resume_text())
            && !self.job_description.trim().is_empty()
    }

    pub fn job_description_chars(&self) -> usize {
        self.job_description.chars().count()
    }
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| rejected(e, "Malformed form field"))
}

// A body cut off by the upload limit is a 413, anything else a bad request.
fn rejected(e: MultipartError, context: &str) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge;
    }
    AppError::Validation(format!("{context}: {e}"))
}

/// The carried result is client-supplied, so it is sanitized like any
/// backend body. Anything other than a JSON object is ignored.
fn carried_result(raw: &str) -> Option<EvaluationResult> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) if value.is_object() => Some(normalize(&UnknownPayload::new(value))),
        Ok(_) => None,
        Err(e) => {
            debug!("Ignoring unreadable previous result: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> ResumeFile {
        ResumeFile {
            file_name: "resume.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
            bytes: Bytes::from_static(b"%PDF-1.4"),
        }
    }

    #[test]
    fn test_not_ready_without_resume_source() {
        let form = AnalysisForm {
            job_description: "Rust developer".to_string(),
            ..Default::default()
        };
        assert!(!form.ready());
    }

    #[test]
    fn test_not_ready_with_blank_text() {
        let form = AnalysisForm {
            resume_text: "   \n".to_string(),
            job_description: "Rust developer".to_string(),
            ..Default::default()
        };
        assert!(!form.ready());
    }

    #[test]
    fn test_not_ready_without_job_description() {
        let form = AnalysisForm {
            resume_file: Some(file()),
            ..Default::default()
        };
        assert!(!form.ready());
    }

    #[test]
    fn test_ready_with_file_or_text() {
        let with_file = AnalysisForm {
            resume_file: Some(file()),
            job_description: "Rust developer".to_string(),
            ..Default::default()
        };
        let with_text = AnalysisForm {
            resume_text: "10 years of Rust".to_string(),
            job_description: "Rust developer".to_string(),
            ..Default::default()
        };
        assert!(with_file.ready());
        assert!(with_text.ready());
    }

    #[test]
    fn test_carried_result_is_sanitized() {
        let result = carried_result(
            r#"{"id": 11, "matchPercentage": 140, "suggestions": ["a", "a"]}"#,
        )
        .unwrap();
        assert_eq!(result.id, 11);
        assert_eq!(result.match_percentage, 100);
        assert_eq!(result.suggestions, vec!["a"]);
    }

    #[test]
    fn test_carried_result_ignores_garbage() {
        assert!(carried_result("").is_none());
        assert!(carried_result("{not json").is_none());
        assert!(carried_result("[1, 2]").is_none());
    }

    #[test]
    fn test_tab_parse_defaults_to_upload() {
        assert_eq!(ResumeTab::parse("paste"), ResumeTab::Paste);
        assert_eq!(ResumeTab::parse("anything"), ResumeTab::Upload);
    }
}
