//! 历史记录 DTO

use serde::{Deserialize, Serialize};

use crate::services::history::{DiseaseHistoryItem, HistoryView, SymptomHistoryItem};

/// 历史查询参数
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct HistoryParams {
    /// 返回条目上限
    pub limit: Option<usize>,
}

/// 历史记录响应
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// 已确认症状（新到旧）
    pub symptoms: Vec<SymptomHistoryItem>,
    /// 诊断结果（新到旧）
    pub diseases: Vec<DiseaseHistoryItem>,
}

impl From<HistoryView> for HistoryResponse {
    fn from(view: HistoryView) -> Self {
        Self {
            symptoms: view.symptoms,
            diseases: view.diseases,
        }
    }
}
