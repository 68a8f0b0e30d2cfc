use askama::Template;
use axum::response::Html;

use crate::analysis::fallback::{resolve, resolve_record, ResolvedEvaluation};
use crate::analysis::form::{AnalysisForm, ResumeTab};
use crate::errors::AppError;
use crate::models::{EvaluationRecord, EvaluationResult, UnknownPayload};
use crate::pages::layout::render;

/// What the latest submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Empty,
    Error(String),
    Result(Box<EvaluationResult>),
}

#[derive(Template)]
#[template(path = "analyze.html")]
struct AnalyzePage<'a> {
    signed_in: bool,
    form: &'a AnalysisForm,
    pasting: bool,
    selected_file: Option<&'a str>,
    error: Option<&'a str>,
    shown: Option<ResolvedEvaluation>,
    carried: Option<String>,
}

/// The analysis page: inputs, an error line when the last submission failed,
/// and the most recent result. A failure leaves the previous result showing.
pub fn analyze_page(
    form: &AnalysisForm,
    outcome: &Outcome,
    signed_in: bool,
) -> Result<Html<String>, AppError> {
    let (error, current) = match outcome {
        Outcome::Empty => (None, form.previous_result.as_ref()),
        Outcome::Error(message) => (Some(message.as_str()), form.previous_result.as_ref()),
        Outcome::Result(result) => (None, Some(&**result)),
    };

    render(&AnalyzePage {
        signed_in,
        form,
        pasting: form.tab == ResumeTab::Paste,
        selected_file: form.resume_file.as_ref().map(|f| f.file_name.as_str()),
        error,
        shown: current.map(resolve),
        carried: current.map(|result| UnknownPayload::from(result).to_json()),
    })
}

struct HistoryRow {
    id: i64,
    created: String,
    match_percentage: i64,
    ats_score: i64,
    missing_skills: String,
}

#[derive(Template)]
#[template(path = "history.html")]
struct HistoryPage {
    signed_in: bool,
    rows: Vec<HistoryRow>,
}

/// Past evaluations, newest first as returned by the backend.
pub fn history_page(
    records: &[EvaluationRecord],
    signed_in: bool,
) -> Result<Html<String>, AppError> {
    let rows = records
        .iter()
        .map(|record| HistoryRow {
            id: record.result.id,
            created: record
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(|| "—".to_string()),
            match_percentage: record.result.match_percentage,
            ats_score: record.result.ats_score,
            missing_skills: record.result.missing_skills.join(", "),
        })
        .collect();

    render(&HistoryPage { signed_in, rows })
}

#[derive(Template)]
#[template(path = "evaluation.html")]
struct EvaluationPage<'a> {
    signed_in: bool,
    result: ResolvedEvaluation,
    resume_text: &'a str,
    job_description: &'a str,
}

/// One past evaluation, rendered with the same result view as a fresh analysis.
pub fn evaluation_page(
    record: &EvaluationRecord,
    signed_in: bool,
) -> Result<Html<String>, AppError> {
    render(&EvaluationPage {
        signed_in,
        result: resolve_record(record),
        resume_text: &record.result.resume_text,
        job_description: &record.result.job_description,
    })
}
