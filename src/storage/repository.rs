use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Disease, DiseaseHistoryEntry, Symptom, SymptomHistoryEntry};

/// 参考数据仓储
///
/// 症状严重度、症状/疾病描述与疾病预防建议的读写接口。
/// 查询接口按名称返回，缺失即 None，由上层降级为回退文案。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    /// 写入或覆盖症状严重度
    async fn upsert_symptom(&self, symptom: &Symptom) -> Result<()>;

    /// 写入描述（名称可指向症状或疾病，与原始主数据一致）
    async fn set_description(&self, name: &str, description: &str) -> Result<()>;

    /// 写入或覆盖疾病预防建议
    async fn upsert_disease(&self, disease: &Disease) -> Result<()>;

    /// 查询严重度
    async fn get_severity(&self, name: &str) -> Result<Option<u32>>;

    /// 查询描述
    async fn get_description(&self, name: &str) -> Result<Option<String>>;

    /// 查询预防建议
    async fn get_precautions(&self, name: &str) -> Result<Option<Vec<String>>>;

    /// 查询完整症状记录
    async fn get_symptom(&self, name: &str) -> Result<Option<Symptom>>;

    /// 查询完整疾病记录
    async fn get_disease(&self, name: &str) -> Result<Option<Disease>>;

    /// 列出全部已知症状名称
    async fn list_symptom_names(&self) -> Result<Vec<String>>;
}

/// 历史记录仓储
///
/// 追加式日志：已确认症状与诊断结果各一条时间线。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// 追加症状记录
    async fn append_symptom(&self, entry: &SymptomHistoryEntry) -> Result<()>;

    /// 追加诊断记录
    async fn append_disease(&self, entry: &DiseaseHistoryEntry) -> Result<()>;

    /// 最近的症状记录（新到旧）
    async fn recent_symptoms(&self, limit: usize) -> Result<Vec<SymptomHistoryEntry>>;

    /// 最近的诊断记录（新到旧）
    async fn recent_diseases(&self, limit: usize) -> Result<Vec<DiseaseHistoryEntry>>;
}
