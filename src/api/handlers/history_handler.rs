use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use tracing::debug;

use crate::{
    api::{
        app_state::AppState,
        dto::history_dto::{HistoryParams, HistoryResponse},
    },
    error::AppError,
};

/// 问诊历史（症状与诊断两条时间线，新到旧）
pub async fn get_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(100);
    debug!("Fetching interaction history, limit={}", limit);

    let view = state.history_service.history(limit).await?;
    Ok(Json(HistoryResponse::from(view)))
}
