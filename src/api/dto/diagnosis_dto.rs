//! 诊断 DTO
//!
//! 定义问诊交互的请求和响应数据结构。响应形态与原客户端约定保持一致：
//! `is_prediction` 作为判别字段。

use serde::{Deserialize, Serialize};

use crate::services::diagnosis::{DiagnosisReport, StepInput, StepOutcome};

/// 一轮交互请求
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct StepRequest {
    /// 本轮被确认的症状（null/缺失表示没有可确认的症状）
    pub current_symptom: Option<String>,
    /// 已确认症状集合
    pub symptoms_present: Vec<String>,
    /// 症状持续天数；接受数字或字符串，非数字按 0 处理
    pub days: Option<serde_json::Value>,
}

impl StepRequest {
    /// 防御性解析持续天数
    pub fn duration_days(&self) -> u32 {
        match &self.days {
            Some(serde_json::Value::Number(n)) => {
                n.as_u64().map(|v| v.min(u64::from(u32::MAX)) as u32).unwrap_or(0)
            }
            Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// 转为服务层输入
    pub fn into_step_input(self) -> StepInput {
        let duration_days = self.duration_days();
        StepInput {
            current_symptom: self.current_symptom,
            symptoms_present: self.symptoms_present,
            duration_days,
        }
    }
}

/// 一轮交互响应
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StepResponse {
    /// 终止：诊断结果
    Prediction {
        is_prediction: bool,
        disease: String,
        description: String,
        precautions: Vec<String>,
        severity_assessment: String,
    },
    /// 继续：下一个要询问的症状（null 表示无症状可问）
    Question {
        is_prediction: bool,
        next_symptom: Option<String>,
    },
}

impl From<StepOutcome> for StepResponse {
    fn from(outcome: StepOutcome) -> Self {
        match outcome {
            StepOutcome::Prediction(DiagnosisReport {
                disease,
                description,
                precautions,
                assessment,
                ..
            }) => StepResponse::Prediction {
                is_prediction: true,
                disease,
                description,
                precautions,
                severity_assessment: assessment.message().to_string(),
            },
            StepOutcome::Question { next_symptom } => StepResponse::Question {
                is_prediction: false,
                next_symptom,
            },
        }
    }
}

/// 模型准确率响应
#[derive(Debug, Serialize, Deserialize)]
pub struct AccuracyResponse {
    /// 两位小数的准确率
    pub accuracy: String,
}
