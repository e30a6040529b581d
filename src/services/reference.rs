//! 参考数据服务
//!
//! 对仓储的薄封装：按名称查询严重度、描述与预防建议。
//! 所有查询缺失即 None，降级策略留给调用方。

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::storage::repository::ReferenceRepository;

/// 参考数据服务 trait
#[async_trait]
pub trait ReferenceDataService: Send + Sync {
    /// 单个症状的严重度权重
    async fn severity_weight(&self, name: &str) -> Result<Option<u32>>;

    /// 一批症状的严重度权重表（缺失的名称不出现在表中）
    async fn severity_weights(&self, names: &[String]) -> Result<HashMap<String, u32>>;

    /// 名称对应的描述
    async fn description(&self, name: &str) -> Result<Option<String>>;

    /// 疾病的预防建议
    async fn precautions(&self, disease: &str) -> Result<Option<Vec<String>>>;

    /// 全部已知症状名称
    async fn all_symptom_names(&self) -> Result<Vec<String>>;
}

/// 参考数据服务实现
pub struct ReferenceDataServiceImpl {
    repository: Arc<dyn ReferenceRepository>,
}

impl ReferenceDataServiceImpl {
    /// 创建新的服务实例
    pub fn new(repository: Arc<dyn ReferenceRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ReferenceDataService for ReferenceDataServiceImpl {
    async fn severity_weight(&self, name: &str) -> Result<Option<u32>> {
        self.repository.get_severity(name).await
    }

    async fn severity_weights(&self, names: &[String]) -> Result<HashMap<String, u32>> {
        let mut weights = HashMap::with_capacity(names.len());
        for name in names {
            if let Some(severity) = self.repository.get_severity(name).await? {
                weights.insert(name.clone(), severity);
            }
        }
        Ok(weights)
    }

    async fn description(&self, name: &str) -> Result<Option<String>> {
        self.repository.get_description(name).await
    }

    async fn precautions(&self, disease: &str) -> Result<Option<Vec<String>>> {
        self.repository.get_precautions(disease).await
    }

    async fn all_symptom_names(&self) -> Result<Vec<String>> {
        self.repository.list_symptom_names().await
    }
}

/// 创建参考数据服务
pub fn create_reference_service(
    repository: Arc<dyn ReferenceRepository>,
) -> Box<dyn ReferenceDataService> {
    Box::new(ReferenceDataServiceImpl::new(repository))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Symptom;
    use crate::storage::memory::InMemoryReferenceRepository;

    async fn service() -> ReferenceDataServiceImpl {
        let repository = Arc::new(InMemoryReferenceRepository::new());
        repository
            .upsert_symptom(&Symptom::new("fever", 3))
            .await
            .unwrap();
        repository
            .upsert_symptom(&Symptom::new("cough", 2))
            .await
            .unwrap();
        ReferenceDataServiceImpl::new(repository)
    }

    #[tokio::test]
    async fn test_severity_weights_skips_missing_names() {
        let service = service().await;
        let names = vec![
            "fever".to_string(),
            "cough".to_string(),
            "not_loaded".to_string(),
        ];
        let weights = service.severity_weights(&names).await.unwrap();
        assert_eq!(weights.len(), 2);
        assert_eq!(weights.get("fever"), Some(&3));
        assert!(!weights.contains_key("not_loaded"));
    }

    #[tokio::test]
    async fn test_missing_lookups_return_none() {
        let service = service().await;
        assert_eq!(service.description("fever").await.unwrap(), None);
        assert_eq!(service.precautions("Flu").await.unwrap(), None);
    }
}
