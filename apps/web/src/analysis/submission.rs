//! Submission Client — one outbound analysis request per ready form.

use tracing::{info, warn};

use crate::analysis::form::AnalysisForm;
use crate::analysis::sanitizer::normalize;
use crate::backend_client::{BackendError, RankerBackend};
use crate::models::EvaluationResult;

/// Sends the form to the backend and sanitizes whatever comes back.
///
/// The caller checks `AnalysisForm::ready()` first. The bearer token is
/// attached when present; without it the backend decides. No retry.
pub async fn submit_analysis(
    backend: &dyn RankerBackend,
    form: &AnalysisForm,
    token: Option<&str>,
) -> Result<EvaluationResult, BackendError> {
    let raw = backend.rank(form, token).await.map_err(|e| {
        warn!("Analysis request failed: {e}");
        e
    })?;

    let result = normalize(&raw);
    info!(
        "Analysis complete: id={}, match={}%, ats={}%, missing_skills={}",
        result.id,
        result.match_percentage,
        result.ats_score,
        result.missing_skills.len()
    );
    Ok(result)
}
