use std::collections::HashMap;

use crate::error::{AppError, Result};

/// 症状目录
///
/// 固定有序的症状名称集合，定义特征向量的位置分配。
/// 目录位置 i 必须与模型训练时的特征索引 i 一致；
/// 目录在模型生命周期内不可变，变更目录即作废模型。
#[derive(Debug, Clone)]
pub struct SymptomCatalog {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl SymptomCatalog {
    /// 从有序名称列表构建目录
    ///
    /// 名称必须互不相同，重复名称意味着训练数据损坏。
    pub fn from_names(names: Vec<String>) -> Result<Self> {
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(AppError::Dataset(format!(
                    "duplicate symptom in catalog: {}",
                    name
                )));
            }
        }
        Ok(Self { names, index })
    }

    /// 目录大小（特征维度）
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// 目录是否为空
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// 是否包含指定症状
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// 症状的特征位置
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// 指定位置的症状名称
    pub fn name_at(&self, position: usize) -> Option<&str> {
        self.names.get(position).map(String::as_str)
    }

    /// 全部名称（目录顺序）
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// 目录减去已确认集合后的候选症状（目录顺序）
    pub fn remaining<'a>(&'a self, confirmed: &[String]) -> Vec<&'a str> {
        self.names
            .iter()
            .filter(|name| !confirmed.iter().any(|c| c == *name))
            .map(String::as_str)
            .collect()
    }
}
