//! Medibot - 交互式症状诊断服务
//!
//! 基于决策树分类器的问诊助手：逐轮确认用户症状，在达到终止条件后
//! 给出疾病预测、严重程度评估与预防建议。

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;
