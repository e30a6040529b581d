//! 历史记录服务
//!
//! 追加已确认症状与诊断结果，并提供与参考数据联结后的历史视图。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;
use crate::models::{DiseaseHistoryEntry, SymptomHistoryEntry};
use crate::storage::repository::{HistoryRepository, ReferenceRepository};

/// 症状历史视图条目（联结严重度与描述）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomHistoryItem {
    /// 症状名称
    pub symptom: String,
    /// 严重度权重
    pub severity: Option<u32>,
    /// 描述
    pub description: Option<String>,
    /// 记录时间
    pub recorded_at: DateTime<Utc>,
}

/// 诊断历史视图条目（联结预防建议）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseHistoryItem {
    /// 疾病名称
    pub disease: String,
    /// 预防建议
    pub precautions: Option<Vec<String>>,
    /// 记录时间
    pub recorded_at: DateTime<Utc>,
}

/// 历史视图（新到旧）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryView {
    /// 已确认症状
    pub symptoms: Vec<SymptomHistoryItem>,
    /// 诊断结果
    pub diseases: Vec<DiseaseHistoryItem>,
}

/// 历史记录服务 trait
#[async_trait]
pub trait HistoryService: Send + Sync {
    /// 记录一次症状确认
    async fn record_symptom(&self, symptom: &str) -> Result<SymptomHistoryEntry>;

    /// 记录一次诊断结果
    async fn record_diagnosis(&self, disease: &str) -> Result<DiseaseHistoryEntry>;

    /// 查询历史视图
    async fn history(&self, limit: usize) -> Result<HistoryView>;
}

/// 历史记录服务实现
pub struct HistoryServiceImpl {
    repository: Arc<dyn HistoryRepository>,
    reference: Arc<dyn ReferenceRepository>,
}

impl HistoryServiceImpl {
    /// 创建新的服务实例
    pub fn new(
        repository: Arc<dyn HistoryRepository>,
        reference: Arc<dyn ReferenceRepository>,
    ) -> Self {
        Self {
            repository,
            reference,
        }
    }
}

#[async_trait]
impl HistoryService for HistoryServiceImpl {
    async fn record_symptom(&self, symptom: &str) -> Result<SymptomHistoryEntry> {
        let entry = SymptomHistoryEntry::new(symptom);
        self.repository.append_symptom(&entry).await?;
        Ok(entry)
    }

    async fn record_diagnosis(&self, disease: &str) -> Result<DiseaseHistoryEntry> {
        let entry = DiseaseHistoryEntry::new(disease);
        self.repository.append_disease(&entry).await?;
        Ok(entry)
    }

    async fn history(&self, limit: usize) -> Result<HistoryView> {
        let mut symptoms = Vec::new();
        for entry in self.repository.recent_symptoms(limit).await? {
            let reference = self.reference.get_symptom(&entry.symptom).await?;
            symptoms.push(SymptomHistoryItem {
                symptom: entry.symptom,
                severity: reference.as_ref().map(|s| s.severity),
                description: reference.and_then(|s| s.description),
                recorded_at: entry.recorded_at,
            });
        }

        let mut diseases = Vec::new();
        for entry in self.repository.recent_diseases(limit).await? {
            let precautions = self.reference.get_precautions(&entry.disease).await?;
            diseases.push(DiseaseHistoryItem {
                disease: entry.disease,
                precautions,
                recorded_at: entry.recorded_at,
            });
        }

        Ok(HistoryView { symptoms, diseases })
    }
}

/// 创建历史记录服务
pub fn create_history_service(
    repository: Arc<dyn HistoryRepository>,
    reference: Arc<dyn ReferenceRepository>,
) -> Box<dyn HistoryService> {
    Box::new(HistoryServiceImpl::new(repository, reference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Disease, Symptom};
    use crate::storage::memory::{InMemoryHistoryRepository, InMemoryReferenceRepository};

    async fn service() -> HistoryServiceImpl {
        let reference = Arc::new(InMemoryReferenceRepository::new());
        reference
            .upsert_symptom(&Symptom::new("fever", 3))
            .await
            .unwrap();
        reference
            .upsert_disease(&Disease::new("Flu", vec!["rest".into()]))
            .await
            .unwrap();
        HistoryServiceImpl::new(Arc::new(InMemoryHistoryRepository::new()), reference)
    }

    #[tokio::test]
    async fn test_history_view_joins_reference_data() {
        let service = service().await;
        service.record_symptom("fever").await.unwrap();
        service.record_symptom("mystery_ache").await.unwrap();
        service.record_diagnosis("Flu").await.unwrap();

        let view = service.history(10).await.unwrap();
        assert_eq!(view.symptoms.len(), 2);
        // 新到旧
        assert_eq!(view.symptoms[0].symptom, "mystery_ache");
        assert_eq!(view.symptoms[0].severity, None);
        assert_eq!(view.symptoms[1].symptom, "fever");
        assert_eq!(view.symptoms[1].severity, Some(3));

        assert_eq!(view.diseases.len(), 1);
        assert_eq!(
            view.diseases[0].precautions,
            Some(vec!["rest".to_string()])
        );
    }
}
