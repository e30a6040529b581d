use std::sync::Arc;

use crate::engine::catalog::SymptomCatalog;

/// 症状向量
///
/// 长度等于目录大小的二值向量：位置 i 为 1 当且仅当目录中
/// 第 i 个症状已被确认。派生数据，不做持久化。
#[derive(Debug, Clone, PartialEq)]
pub struct SymptomVector(Vec<f64>);

impl SymptomVector {
    /// 从原始值构建（测试与模型评估用）
    pub fn from_values(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// 向量长度
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 向量是否为空
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 指定位置的值
    pub fn value_at(&self, position: usize) -> Option<f64> {
        self.0.get(position).copied()
    }

    /// 原始值切片
    pub fn values(&self) -> &[f64] {
        &self.0
    }
}

/// 症状编码器
///
/// 按目录顺序将已确认症状集合编码为固定长度的二值向量。
/// 纯函数：无副作用，给定目录顺序下完全确定。
#[derive(Debug, Clone)]
pub struct SymptomEncoder {
    catalog: Arc<SymptomCatalog>,
}

impl SymptomEncoder {
    /// 创建编码器
    pub fn new(catalog: Arc<SymptomCatalog>) -> Self {
        Self { catalog }
    }

    /// 编码已确认症状
    ///
    /// 目录外名称被忽略（容忍客户端的过期状态），不报错。
    pub fn encode(&self, confirmed: &[String]) -> SymptomVector {
        let mut values = vec![0.0; self.catalog.len()];
        for name in confirmed {
            if let Some(position) = self.catalog.position(name) {
                values[position] = 1.0;
            }
        }
        SymptomVector(values)
    }
}
