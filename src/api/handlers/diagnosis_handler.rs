use axum::{extract::State, response::IntoResponse, Json};
use tracing::debug;

use crate::{
    api::{
        app_state::AppState,
        dto::diagnosis_dto::{AccuracyResponse, StepRequest, StepResponse},
    },
    error::AppError,
    services::diagnosis::StepOutcome,
};

/// 推进一轮问诊交互
pub async fn diagnosis_step(
    State(state): State<AppState>,
    Json(request): Json<StepRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!(
        "Diagnosis step: current={:?}, {} symptoms present",
        request.current_symptom,
        request.symptoms_present.len()
    );

    let outcome = state
        .diagnosis_service
        .step(request.into_step_input())
        .await
        .inspect_err(|_| state.metrics.record_error())?;

    match &outcome {
        StepOutcome::Prediction(_) => state.metrics.record_prediction(),
        StepOutcome::Question { .. } => state.metrics.record_question(),
    }

    Ok(Json(StepResponse::from(outcome)))
}

/// 模型留出集准确率（仅供展示）
pub async fn model_accuracy(State(state): State<AppState>) -> impl IntoResponse {
    let accuracy = state.diagnosis_service.model_accuracy();
    Json(AccuracyResponse {
        accuracy: format!("{:.2}", accuracy),
    })
}
