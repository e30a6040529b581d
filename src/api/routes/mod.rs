//! 路由模块

pub mod diagnosis_routes;
pub mod history_routes;
pub mod symptom_routes;
