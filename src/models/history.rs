use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 已确认症状的历史记录条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomHistoryEntry {
    /// 条目唯一标识
    pub id: String,
    /// 症状名称
    pub symptom: String,
    /// 记录时间
    pub recorded_at: DateTime<Utc>,
}

impl SymptomHistoryEntry {
    /// 创建新条目
    pub fn new(symptom: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            symptom: symptom.to_string(),
            recorded_at: Utc::now(),
        }
    }
}

/// 诊断结果的历史记录条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseHistoryEntry {
    /// 条目唯一标识
    pub id: String,
    /// 疾病名称
    pub disease: String,
    /// 记录时间
    pub recorded_at: DateTime<Utc>,
}

impl DiseaseHistoryEntry {
    /// 创建新条目
    pub fn new(disease: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            disease: disease.to_string(),
            recorded_at: Utc::now(),
        }
    }
}
