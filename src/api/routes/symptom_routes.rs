//! Symptom Routes
//!
//! 定义症状目录相关的 API 路由。

use crate::api::handlers::symptom_handler::*;
use axum::{routing::get, Router};

use crate::api::app_state::AppState;

/// 创建症状路由器
pub fn create_symptom_router() -> Router<AppState> {
    Router::new()
        .route("/symptoms", get(get_symptoms))
        .route("/symptoms/all", get(get_all_symptoms))
}
