use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;

use crate::error::Result;
use crate::models::{Disease, DiseaseHistoryEntry, Symptom, SymptomHistoryEntry};
use crate::storage::repository::{HistoryRepository, ReferenceRepository};

/// 进程内参考数据仓储
///
/// 启动时由主数据载入填充，之后只读。描述与严重度共用一张
/// 症状表（与原始单表结构一致），疾病表存放预防建议。
#[derive(Debug, Default)]
pub struct InMemoryReferenceRepository {
    symptoms: DashMap<String, Symptom>,
    diseases: DashMap<String, Disease>,
}

impl InMemoryReferenceRepository {
    /// 创建空仓储
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReferenceRepository for InMemoryReferenceRepository {
    async fn upsert_symptom(&self, symptom: &Symptom) -> Result<()> {
        self.symptoms
            .entry(symptom.name.clone())
            .and_modify(|existing| existing.severity = symptom.severity)
            .or_insert_with(|| symptom.clone());
        Ok(())
    }

    async fn set_description(&self, name: &str, description: &str) -> Result<()> {
        self.symptoms
            .entry(name.to_string())
            .and_modify(|existing| existing.description = Some(description.to_string()))
            .or_insert_with(|| Symptom::new(name, 0).with_description(description));
        Ok(())
    }

    async fn upsert_disease(&self, disease: &Disease) -> Result<()> {
        self.diseases.insert(disease.name.clone(), disease.clone());
        Ok(())
    }

    async fn get_severity(&self, name: &str) -> Result<Option<u32>> {
        Ok(self.symptoms.get(name).map(|s| s.value().severity))
    }

    async fn get_description(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .symptoms
            .get(name)
            .and_then(|s| s.value().description.clone()))
    }

    async fn get_precautions(&self, name: &str) -> Result<Option<Vec<String>>> {
        Ok(self.diseases.get(name).map(|d| d.value().precautions.clone()))
    }

    async fn get_symptom(&self, name: &str) -> Result<Option<Symptom>> {
        Ok(self.symptoms.get(name).map(|s| s.value().clone()))
    }

    async fn get_disease(&self, name: &str) -> Result<Option<Disease>> {
        Ok(self.diseases.get(name).map(|d| d.value().clone()))
    }

    async fn list_symptom_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.symptoms.iter().map(|s| s.key().clone()).collect();
        names.sort();
        Ok(names)
    }
}

/// 进程内历史记录仓储
///
/// 追加式日志，最新条目在尾部；查询时反转为新到旧。
#[derive(Debug, Default)]
pub struct InMemoryHistoryRepository {
    symptoms: RwLock<Vec<SymptomHistoryEntry>>,
    diseases: RwLock<Vec<DiseaseHistoryEntry>>,
}

impl InMemoryHistoryRepository {
    /// 创建空仓储
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn append_symptom(&self, entry: &SymptomHistoryEntry) -> Result<()> {
        self.symptoms.write().push(entry.clone());
        Ok(())
    }

    async fn append_disease(&self, entry: &DiseaseHistoryEntry) -> Result<()> {
        self.diseases.write().push(entry.clone());
        Ok(())
    }

    async fn recent_symptoms(&self, limit: usize) -> Result<Vec<SymptomHistoryEntry>> {
        Ok(self
            .symptoms
            .read()
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn recent_diseases(&self, limit: usize) -> Result<Vec<DiseaseHistoryEntry>> {
        Ok(self
            .diseases
            .read()
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}
