//! Axum handlers for the analysis and history pages.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::debug;

use crate::analysis::form::AnalysisForm;
use crate::analysis::sanitizer::{normalize_history, normalize_record};
use crate::analysis::submission::submit_analysis;
use crate::analysis::views::{analyze_page, evaluation_page, history_page, Outcome};
use crate::auth::session::Session;
use crate::errors::AppError;
use crate::state::AppState;

/// GET /analyze
pub async fn handle_analyze_page(session: Session) -> Result<Html<String>, AppError> {
    analyze_page(
        &AnalysisForm::default(),
        &Outcome::Empty,
        session.is_signed_in(),
    )
}

/// POST /analyze
///
/// A form without a resume source or job description is sent back as a 422
/// and never reaches the backend. Backend failures become one error line
/// under the form; inputs and the previous result are preserved.
pub async fn handle_analyze(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = AnalysisForm::from_multipart(multipart).await?;
    let signed_in = session.is_signed_in();

    if !form.ready() {
        debug!("Analysis form not ready; no request sent");
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            analyze_page(&form, &Outcome::Empty, signed_in)?,
        )
            .into_response());
    }

    let outcome = match submit_analysis(state.backend.as_ref(), &form, session.token()).await {
        Ok(result) => Outcome::Result(Box::new(result)),
        Err(e) => Outcome::Error(e.user_message()),
    };

    Ok(analyze_page(&form, &outcome, signed_in)?.into_response())
}

/// GET /history
pub async fn handle_history(
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, AppError> {
    let raw = state.backend.list_evaluations(session.token()).await?;
    let records = normalize_history(raw);
    debug!("Loaded {} past evaluations", records.len());
    history_page(&records, session.is_signed_in())
}

/// GET /history/:id
pub async fn handle_history_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    session: Session,
) -> Result<Html<String>, AppError> {
    let raw = state.backend.get_evaluation(id, session.token()).await?;
    if raw.is_null() {
        return Err(AppError::NotFound(format!("Evaluation {id} not found")));
    }

    let record = normalize_record(&raw);
    evaluation_page(&record, session.is_signed_in())
}
