//! 请求处理器模块

pub mod diagnosis_handler;
pub mod history_handler;
pub mod symptom_handler;
