//! `POST /api/analyze`: score a submitted survey.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::api::error::ApiError;
use crate::models::{Assessment, SurveyResponses};
use crate::scoring::{assess_observed, TracingPhaseObserver};

/// Runs the full pipeline against today's date (UTC). Any decodable
/// body yields an assessment.
pub async fn analyze(
    payload: Result<Json<SurveyResponses>, JsonRejection>,
) -> Result<Json<Assessment>, ApiError> {
    let Json(answers) = payload?;
    let today = chrono::Utc::now().date_naive();
    let assessment = assess_observed(&answers, today, &TracingPhaseObserver);

    tracing::debug!(
        primary = ?assessment.analysis.primary_imbalance,
        confidence = %assessment.analysis.confidence_level,
        phase = %assessment.analysis.cycle_phase,
        "Survey analyzed"
    );
    Ok(Json(assessment))
}
