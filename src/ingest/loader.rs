use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::config::DataConfig;
use crate::engine::catalog::SymptomCatalog;
use crate::engine::encoder::SymptomVector;
use crate::engine::tree::DecisionTreeModel;
use crate::error::{AppError, Result};
use crate::ingest::dataset::LabeledDataset;
use crate::ingest::trainer::DecisionTreeTrainer;
use crate::models::{Disease, Symptom};
use crate::storage::repository::ReferenceRepository;

/// 启动时载入的（目录，模型）对
///
/// 进程启动时构建一次，此后只读共享（write-once, read-many）。
pub struct ModelBundle {
    /// 症状目录
    pub catalog: Arc<SymptomCatalog>,
    /// 已拟合的决策树模型
    pub model: Arc<DecisionTreeModel>,
    /// 留出集准确率（仅供展示）
    pub accuracy: f64,
}

/// 拟合分类器并构建症状目录
///
/// 训练 CSV 的特征列顺序即目录顺序；如配置了测试 CSV，
/// 校验其表头与目录一致，不一致说明数据文件版本漂移，直接失败。
pub fn load_model_bundle(data: &DataConfig) -> Result<ModelBundle> {
    let training = LabeledDataset::from_csv(&data.training_csv)?;
    let catalog = Arc::new(SymptomCatalog::from_names(training.feature_names.clone())?);

    if data.testing_csv.as_os_str().len() > 0 && data.testing_csv.exists() {
        let testing = LabeledDataset::from_csv(&data.testing_csv)?;
        if testing.feature_names != training.feature_names {
            return Err(AppError::Dataset(format!(
                "{} feature columns do not match {}",
                data.testing_csv.display(),
                data.training_csv.display()
            )));
        }
    }

    let (train, held_out) = training.train_test_split(data.test_size, data.split_seed);
    let model = DecisionTreeTrainer::new().fit(&train)?;

    let held_out_samples: Vec<(SymptomVector, String)> = held_out
        .rows
        .iter()
        .map(|row| {
            (
                SymptomVector::from_values(row.features.clone()),
                row.label.clone(),
            )
        })
        .collect();
    let accuracy = model.accuracy(&held_out_samples)?;

    info!(
        "Model fitted: {} features, {} nodes, held-out accuracy {:.5}",
        catalog.len(),
        model.node_count(),
        accuracy
    );

    Ok(ModelBundle {
        catalog,
        model: Arc::new(model),
        accuracy,
    })
}

/// 主数据载入统计
#[derive(Debug, Default, Clone, Copy)]
pub struct MasterDataReport {
    /// 严重度行数
    pub severity_rows: usize,
    /// 描述行数
    pub description_rows: usize,
    /// 预防建议行数
    pub precaution_rows: usize,
}

/// 把主数据 CSV 载入参考数据仓储
///
/// 单个文件缺失或个别行损坏只记 warn 并跳过，不阻止启动，
/// 运行时缺失的数据会按回退文案降级。
pub async fn load_master_data(
    data: &DataConfig,
    repository: &dyn ReferenceRepository,
) -> Result<MasterDataReport> {
    let mut report = MasterDataReport::default();

    for row in read_master_rows(&data.severity_csv) {
        let Some((name, rest)) = split_name(&row) else {
            continue;
        };
        match rest[0].trim().parse::<u32>() {
            Ok(severity) => {
                repository.upsert_symptom(&Symptom::new(name, severity)).await?;
                report.severity_rows += 1;
            }
            Err(_) => {
                warn!(
                    "Skipping invalid severity row in {}: {:?}",
                    data.severity_csv.display(),
                    row
                );
            }
        }
    }

    for row in read_master_rows(&data.description_csv) {
        let Some((name, rest)) = split_name(&row) else {
            continue;
        };
        // 描述内可能含逗号，取第一列为名称、其余拼回原文
        repository.set_description(name, &rest.join(",")).await?;
        report.description_rows += 1;
    }

    for row in read_master_rows(&data.precaution_csv) {
        let Some((name, rest)) = split_name(&row) else {
            continue;
        };
        let precautions: Vec<String> = rest
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        repository
            .upsert_disease(&Disease::new(name, precautions))
            .await?;
        report.precaution_rows += 1;
    }

    info!(
        "Master data loaded: {} severity, {} description, {} precaution rows",
        report.severity_rows, report.description_rows, report.precaution_rows
    );

    Ok(report)
}

/// 读主数据 CSV 的行（无表头，逗号分隔）
fn read_master_rows(path: &Path) -> Vec<Vec<String>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Cannot read master data file {}: {}", path.display(), e);
            return Vec::new();
        }
    };
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split(',').map(|field| field.to_string()).collect())
        .collect()
}

/// 拆出（名称，其余字段）；字段不足的行按原实现跳过
fn split_name(row: &[String]) -> Option<(&str, &[String])> {
    if row.len() < 2 || row[0].is_empty() {
        warn!("Skipping invalid master data row: {:?}", row);
        return None;
    }
    Some((row[0].as_str(), &row[1..]))
}
