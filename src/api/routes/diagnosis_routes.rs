//! Diagnosis Routes
//!
//! 定义问诊交互相关的 API 路由。

use crate::api::handlers::diagnosis_handler::*;
use axum::{
    routing::{get, post},
    Router,
};

use crate::api::app_state::AppState;

/// 创建诊断路由器
pub fn create_diagnosis_router() -> Router<AppState> {
    Router::new()
        .route("/diagnosis/step", post(diagnosis_step))
        .route("/model/accuracy", get(model_accuracy))
}
