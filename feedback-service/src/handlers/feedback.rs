use axum::{extract::State, Json};

use crate::models::{DiagnosisComparison, FeedbackResponse};
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use service_core::error::AppError;

/// `POST /analyze-response`
#[tracing::instrument(skip(state, comparison))]
pub async fn analyze_response(
    State(state): State<AppState>,
    ValidatedJson(comparison): ValidatedJson<DiagnosisComparison>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let feedback = state.feedback.handle(&comparison).await?;

    Ok(Json(FeedbackResponse { feedback }))
}
