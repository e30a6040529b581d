//! 存储层模块
//!
//! 定义参考数据与历史记录的仓储接口，并提供进程内实现。
//! 持久化的可靠性不在保证范围内，接口保持可替换。

pub mod memory;
pub mod repository;
