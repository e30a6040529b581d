use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::catalog::SymptomCatalog;

/// 会话状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionState {
    /// 收集症状中
    Collecting,
    /// 已终止，可产出诊断
    Done,
}

/// 确认症状的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// 新增确认
    Added,
    /// 重复确认（集合语义，静默吸收）
    Duplicate,
    /// 目录外症状（拒绝，不加入集合）
    Unknown,
}

/// 诊断会话
///
/// 单次用户交互的全部状态。已确认症状始终是症状目录的子集：
/// 目录外名称被拒绝，不会被静默加入。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisSession {
    /// 会话唯一标识
    pub id: String,

    /// 已确认症状（插入顺序，集合语义）
    confirmed: Vec<String>,

    /// 用户报告的症状持续天数
    pub duration_days: u32,

    /// 会话状态
    state: SessionState,

    /// 会话创建时间
    pub created_at: DateTime<Utc>,
}

impl DiagnosisSession {
    /// 创建新会话
    pub fn new(duration_days: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            confirmed: Vec::new(),
            duration_days,
            state: SessionState::Collecting,
            created_at: Utc::now(),
        }
    }

    /// 确认一个症状
    ///
    /// 重复确认被静默吸收；目录外名称被拒绝。
    pub fn confirm(&mut self, name: &str, catalog: &SymptomCatalog) -> ConfirmOutcome {
        if !catalog.contains(name) {
            return ConfirmOutcome::Unknown;
        }
        if self.confirmed.iter().any(|s| s == name) {
            return ConfirmOutcome::Duplicate;
        }
        self.confirmed.push(name.to_string());
        ConfirmOutcome::Added
    }

    /// 已确认症状
    pub fn confirmed(&self) -> &[String] {
        &self.confirmed
    }

    /// 已确认症状数量
    pub fn confirmed_len(&self) -> usize {
        self.confirmed.len()
    }

    /// 当前状态
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// 终止会话
    pub fn complete(&mut self) {
        self.state = SessionState::Done;
    }

    /// 是否已终止
    pub fn is_done(&self) -> bool {
        self.state == SessionState::Done
    }

    /// 评估终止条件
    ///
    /// 确认数达到上限，或调用方未提供当前症状（问题池耗尽），
    /// 两种情况收敛到同一 Done 路径。
    pub fn evaluate_termination(&mut self, symptom_offered: bool, max_confirmed: usize) {
        if self.confirmed.len() >= max_confirmed || !symptom_offered {
            self.complete();
        }
    }
}
