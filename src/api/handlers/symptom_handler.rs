use axum::{extract::State, response::IntoResponse, Json};
use tracing::debug;

use crate::{api::app_state::AppState, error::AppError};

/// 症状目录（模型的特征名称，目录顺序）
pub async fn get_symptoms(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.diagnosis_service.catalog_names())
}

/// 参考数据中全部已知的症状名称
pub async fn get_all_symptoms(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let names = state.reference_service.all_symptom_names().await?;
    debug!("Listing {} known symptom names", names.len());
    Ok(Json(names))
}
