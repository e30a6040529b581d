//! 核心数据模型模块
//!
//! 定义 Medibot 的核心数据结构：Symptom, Disease, DiagnosisSession
//! 以及问诊历史记录模型。

pub mod disease;
pub mod history;
pub mod session;
pub mod symptom;

pub use disease::*;
pub use history::*;
pub use session::*;
pub use symptom::*;
