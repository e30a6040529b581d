use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 严重程度评估的固定策略阈值
///
/// 严重度因子严格大于该值时建议就医。策略常数，原样保留，不做推导。
pub const CONSULTATION_THRESHOLD: f64 = 13.0;

/// 严重程度评估结论
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SeverityAssessment {
    /// 建议就医
    SeekConsultation,
    /// 注意观察并采取预防措施
    TakePrecautions,
}

impl SeverityAssessment {
    /// 面向用户的评估文案
    pub fn message(&self) -> &'static str {
        match self {
            Self::SeekConsultation => "You should take the consultation from doctor.",
            Self::TakePrecautions => "It might not be that bad but you should take precautions.",
        }
    }
}

/// 严重程度评分器
///
/// 由确认症状的严重度权重与持续天数计算严重度因子：
/// `factor = raw * days / (count + 1)`。分母的 +1 既避免空集合除零，
/// 也对短症状列表做了衰减。
pub struct SeverityScorer;

impl SeverityScorer {
    /// 计算严重度因子
    ///
    /// 权重表中缺失的症状按 0 计（与编码器同等的容忍策略）。
    pub fn score(confirmed: &[String], weights: &HashMap<String, u32>, duration_days: u32) -> f64 {
        let raw: u64 = confirmed
            .iter()
            .map(|name| u64::from(*weights.get(name).unwrap_or(&0)))
            .sum();
        (raw * u64::from(duration_days)) as f64 / (confirmed.len() + 1) as f64
    }

    /// 由严重度因子得出评估结论
    pub fn assess(severity_factor: f64) -> SeverityAssessment {
        if severity_factor > CONSULTATION_THRESHOLD {
            SeverityAssessment::SeekConsultation
        } else {
            SeverityAssessment::TakePrecautions
        }
    }
}
