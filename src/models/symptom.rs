use serde::{Deserialize, Serialize};

/// 症状参考数据
///
/// 由主数据在启动时载入，载入后不可变。严重度权重参与严重程度评分，
/// 描述用于历史记录展示。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Symptom {
    /// 症状名称（唯一标识）
    pub name: String,

    /// 严重度权重
    pub severity: u32,

    /// 描述
    pub description: Option<String>,
}

impl Symptom {
    /// 创建新症状记录
    pub fn new(name: &str, severity: u32) -> Self {
        Self {
            name: name.to_string(),
            severity,
            description: None,
        }
    }

    /// 附加描述
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symptom_creation() {
        let symptom = Symptom::new("fever", 3).with_description("elevated body temperature");
        assert_eq!(symptom.name, "fever");
        assert_eq!(symptom.severity, 3);
        assert_eq!(symptom.description.as_deref(), Some("elevated body temperature"));
    }
}
