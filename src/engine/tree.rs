use serde::{Deserialize, Serialize};

use crate::engine::encoder::SymptomVector;
use crate::error::{AppError, Result};

/// 决策树节点（arena 表示，子节点按索引寻址）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TreeNode {
    /// 内部节点：按固定特征索引与阈值比较后左/右分支
    Internal {
        /// 特征索引
        feature: usize,
        /// 分裂阈值。特征为二值特征，阈值取 0.5：
        /// 值为 1 走右分支，其余（0）走左分支。
        threshold: f64,
        /// 左子节点索引
        left: usize,
        /// 右子节点索引
        right: usize,
    },
    /// 叶节点：携带训练时多数投票解析出的类别
    Leaf {
        /// 疾病标签
        label: String,
    },
}

/// 决策树诊断模型
///
/// 包装一棵已拟合的分类树。节点存放在 arena 中，根节点索引为 0。
/// 模型在载入后只读，可在多个会话间并发共享。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeModel {
    nodes: Vec<TreeNode>,
    feature_count: usize,
}

impl DecisionTreeModel {
    /// 从节点 arena 构建模型
    ///
    /// 校验节点引用与特征索引的完整性，损坏的树在此被拒绝。
    pub fn new(nodes: Vec<TreeNode>, feature_count: usize) -> Result<Self> {
        if nodes.is_empty() {
            return Err(AppError::Model("empty tree".into()));
        }
        for (i, node) in nodes.iter().enumerate() {
            if let TreeNode::Internal {
                feature,
                left,
                right,
                ..
            } = node
            {
                if *feature >= feature_count {
                    return Err(AppError::Model(format!(
                        "node {} references feature {} out of {} features",
                        i, feature, feature_count
                    )));
                }
                if *left >= nodes.len() || *right >= nodes.len() {
                    return Err(AppError::Model(format!(
                        "node {} has child index out of bounds",
                        i
                    )));
                }
            }
        }
        Ok(Self {
            nodes,
            feature_count,
        })
    }

    /// 模型期望的特征数
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// 节点数量
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// 预测疾病标签
    ///
    /// 向量长度与特征数不一致属于契约违规（目录/模型版本漂移），
    /// 直接报错，不做任何静默修正。
    pub fn predict(&self, vector: &SymptomVector) -> Result<&str> {
        if vector.len() != self.feature_count {
            return Err(AppError::Model(format!(
                "feature count mismatch: vector has {}, model expects {}",
                vector.len(),
                self.feature_count
            )));
        }

        let mut node = 0usize;
        loop {
            match &self.nodes[node] {
                TreeNode::Leaf { label } => return Ok(label),
                TreeNode::Internal {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    // 值 <= 阈值走左，否则走右；二值特征下即 0 左 1 右
                    let value = vector.value_at(*feature).unwrap_or(0.0);
                    node = if value <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// 在留出集上计算准确率（精确匹配比例）
    ///
    /// 仅供参考展示，不参与运行时决策路径。
    pub fn accuracy(&self, held_out: &[(SymptomVector, String)]) -> Result<f64> {
        if held_out.is_empty() {
            return Ok(0.0);
        }
        let mut matches = 0usize;
        for (vector, expected) in held_out {
            if self.predict(vector)? == expected {
                matches += 1;
            }
        }
        Ok(matches as f64 / held_out.len() as f64)
    }
}
