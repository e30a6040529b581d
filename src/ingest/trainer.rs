use std::collections::HashMap;

use crate::engine::tree::{DecisionTreeModel, TreeNode};
use crate::error::{AppError, Result};
use crate::ingest::dataset::{DataRow, LabeledDataset};

/// 二值特征的分裂阈值（值 1 走右，0 走左）
const BINARY_THRESHOLD: f64 = 0.5;

/// 决策树训练器
///
/// 在二值特征上做标准的基尼不纯度递归划分，叶节点取多数投票标签。
/// 训练过程完全确定：特征按增益择优、同增益取最小索引，
/// 多数票打平取字典序最小标签。
pub struct DecisionTreeTrainer {
    max_depth: usize,
}

impl DecisionTreeTrainer {
    /// 创建训练器
    pub fn new() -> Self {
        Self { max_depth: 64 }
    }

    /// 限制树深
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// 在数据集上拟合决策树
    pub fn fit(&self, dataset: &LabeledDataset) -> Result<DecisionTreeModel> {
        if dataset.is_empty() {
            return Err(AppError::Dataset("cannot fit on empty dataset".into()));
        }
        let feature_count = dataset.feature_names.len();
        let rows: Vec<&DataRow> = dataset.rows.iter().collect();

        let mut nodes = Vec::new();
        Self::build_node(&rows, feature_count, self.max_depth, &mut nodes)?;
        DecisionTreeModel::new(nodes, feature_count)
    }

    /// 递归构建节点，返回其在 arena 中的索引
    fn build_node(
        rows: &[&DataRow],
        feature_count: usize,
        depth_left: usize,
        nodes: &mut Vec<TreeNode>,
    ) -> Result<usize> {
        let parent_gini = gini(rows);

        let split = if depth_left == 0 || parent_gini == 0.0 {
            None
        } else {
            best_split(rows, feature_count, parent_gini)
        };

        match split {
            Some(feature) => {
                let (left_rows, right_rows): (Vec<&DataRow>, Vec<&DataRow>) = rows
                    .iter()
                    .copied()
                    .partition(|row| row.features[feature] <= BINARY_THRESHOLD);

                // 占位，子节点索引回填
                let index = nodes.len();
                nodes.push(TreeNode::Internal {
                    feature,
                    threshold: BINARY_THRESHOLD,
                    left: 0,
                    right: 0,
                });

                let left = Self::build_node(&left_rows, feature_count, depth_left - 1, nodes)?;
                let right = Self::build_node(&right_rows, feature_count, depth_left - 1, nodes)?;

                nodes[index] = TreeNode::Internal {
                    feature,
                    threshold: BINARY_THRESHOLD,
                    left,
                    right,
                };
                Ok(index)
            }
            None => {
                let label = majority_label(rows)
                    .ok_or_else(|| AppError::Dataset("empty partition".into()))?;
                let index = nodes.len();
                nodes.push(TreeNode::Leaf { label });
                Ok(index)
            }
        }
    }
}

impl Default for DecisionTreeTrainer {
    fn default() -> Self {
        Self::new()
    }
}

/// 基尼不纯度
fn gini(rows: &[&DataRow]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row.label.as_str()).or_insert(0) += 1;
    }
    let total = rows.len() as f64;
    1.0 - counts
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            p * p
        })
        .sum::<f64>()
}

/// 选出基尼增益最大的特征；没有正增益的分裂则返回 None
fn best_split(rows: &[&DataRow], feature_count: usize, parent_gini: f64) -> Option<usize> {
    let total = rows.len() as f64;
    let mut best: Option<(usize, f64)> = None;

    for feature in 0..feature_count {
        let (left, right): (Vec<&DataRow>, Vec<&DataRow>) = rows
            .iter()
            .copied()
            .partition(|row| row.features[feature] <= BINARY_THRESHOLD);
        if left.is_empty() || right.is_empty() {
            continue;
        }
        let weighted =
            (left.len() as f64 * gini(&left) + right.len() as f64 * gini(&right)) / total;
        let gain = parent_gini - weighted;
        if gain <= 1e-12 {
            continue;
        }
        match best {
            Some((_, best_gain)) if gain <= best_gain => {}
            _ => best = Some((feature, gain)),
        }
    }

    best.map(|(feature, _)| feature)
}

/// 多数投票标签，打平取字典序最小
fn majority_label(rows: &[&DataRow]) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row.label.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|(label_a, count_a), (label_b, count_b)| {
            count_a.cmp(count_b).then(label_b.cmp(label_a))
        })
        .map(|(label, _)| label.to_string())
}
