//! History Routes
//!
//! 定义问诊历史相关的 API 路由。

use crate::api::handlers::history_handler::*;
use axum::{routing::get, Router};

use crate::api::app_state::AppState;

/// 创建历史记录路由器
pub fn create_history_router() -> Router<AppState> {
    Router::new().route("/history", get(get_history))
}
