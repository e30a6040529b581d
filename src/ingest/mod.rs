//! 数据摄取模块
//!
//! 启动时一次性载入训练数据与主数据：解析 CSV、划分训练/留出集、
//! 拟合决策树并把严重度/描述/预防建议写入参考数据仓储。

pub mod dataset;
pub mod loader;
pub mod trainer;

pub use dataset::{DataRow, LabeledDataset};
pub use loader::{load_master_data, load_model_bundle, MasterDataReport, ModelBundle};
pub use trainer::DecisionTreeTrainer;
