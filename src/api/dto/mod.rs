//! DTO 模块
//!
//! 定义 REST API 的请求和响应数据结构。

pub mod diagnosis_dto;
pub mod history_dto;
