//! 诊断推理引擎
//!
//! 核心推理逻辑：症状目录、二值向量编码、决策树预测、
//! 下一个症状选择策略与严重程度评分。
//! 引擎本身无 I/O，目录与模型在启动时一次性载入后只读共享。

pub mod catalog;
pub mod encoder;
pub mod selector;
pub mod severity;
pub mod tree;

pub use catalog::SymptomCatalog;
pub use encoder::{SymptomEncoder, SymptomVector};
pub use selector::NextSymptomSelector;
pub use severity::{SeverityAssessment, SeverityScorer, CONSULTATION_THRESHOLD};
pub use tree::{DecisionTreeModel, TreeNode};
