//! API 模块
//!
//! 提供 REST API 支持。

pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use crate::api::app_state::AppState;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// 记录请求指标的中间件
async fn metrics_middleware(State(state): State<AppState>, req: Request, next: Next) -> Response {
    state.metrics.record_http_request();
    next.run(req).await
}

pub fn create_router(app_state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::diagnosis_routes::create_diagnosis_router())
        .merge(routes::symptom_routes::create_symptom_router())
        .merge(routes::history_routes::create_history_router());

    Router::new()
        .nest("/api/v1", api)
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            metrics_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
