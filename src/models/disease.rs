use serde::{Deserialize, Serialize};

/// 疾病参考数据
///
/// 预防建议保持主数据中的原始顺序。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Disease {
    /// 疾病名称（唯一标识）
    pub name: String,

    /// 预防建议（有序）
    pub precautions: Vec<String>,
}

impl Disease {
    /// 创建新疾病记录
    pub fn new(name: &str, precautions: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            precautions,
        }
    }
}
