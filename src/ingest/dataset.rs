use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fs;
use std::path::Path;

use crate::error::{AppError, Result};

/// 一条带标签的样本
#[derive(Debug, Clone, PartialEq)]
pub struct DataRow {
    /// 二值特征（目录顺序）
    pub features: Vec<f64>,
    /// 预后标签
    pub label: String,
}

/// 带标签的表格数据集
///
/// CSV 首行为表头：前 N 列是症状特征，最后一列是预后标签。
#[derive(Debug, Clone)]
pub struct LabeledDataset {
    /// 特征列名（即症状目录的名称来源）
    pub feature_names: Vec<String>,
    /// 样本行
    pub rows: Vec<DataRow>,
}

impl LabeledDataset {
    /// 从 CSV 文件载入
    pub fn from_csv(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Dataset(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_csv_str(&content, path.display().to_string().as_str())
    }

    /// 从 CSV 文本载入
    pub fn from_csv_str(content: &str, source: &str) -> Result<Self> {
        let mut lines = content.lines().filter(|line| !line.trim().is_empty());

        let header = lines
            .next()
            .ok_or_else(|| AppError::Dataset(format!("{}: empty file", source)))?;
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        if columns.len() < 2 {
            return Err(AppError::Dataset(format!(
                "{}: header needs at least one feature and a label column",
                source
            )));
        }
        let feature_names: Vec<String> = columns[..columns.len() - 1]
            .iter()
            .map(|name| name.to_string())
            .collect();

        let mut rows = Vec::new();
        for (line_no, line) in lines.enumerate() {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != columns.len() {
                return Err(AppError::Dataset(format!(
                    "{}: line {} has {} fields, expected {}",
                    source,
                    line_no + 2,
                    fields.len(),
                    columns.len()
                )));
            }
            let mut features = Vec::with_capacity(feature_names.len());
            for (i, field) in fields[..fields.len() - 1].iter().enumerate() {
                let value: f64 = field.parse().map_err(|_| {
                    AppError::Dataset(format!(
                        "{}: line {} column {} is not numeric: {:?}",
                        source,
                        line_no + 2,
                        i + 1,
                        field
                    ))
                })?;
                features.push(value);
            }
            rows.push(DataRow {
                features,
                label: fields[fields.len() - 1].to_string(),
            });
        }

        if rows.is_empty() {
            return Err(AppError::Dataset(format!("{}: no data rows", source)));
        }

        Ok(Self {
            feature_names,
            rows,
        })
    }

    /// 样本数量
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 按比例随机划分为（训练集，留出集）
    ///
    /// 固定种子下划分可复现。留出集仅用于准确率报告。
    pub fn train_test_split(&self, test_size: f64, seed: u64) -> (LabeledDataset, LabeledDataset) {
        let mut indices: Vec<usize> = (0..self.rows.len()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let test_len = ((self.rows.len() as f64) * test_size.clamp(0.0, 1.0)).round() as usize;
        let (test_idx, train_idx) = indices.split_at(test_len.min(self.rows.len()));

        let pick = |idx: &[usize]| LabeledDataset {
            feature_names: self.feature_names.clone(),
            rows: idx.iter().map(|&i| self.rows[i].clone()).collect(),
        };

        (pick(train_idx), pick(test_idx))
    }
}
