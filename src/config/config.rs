use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 请求超时（秒）
    pub request_timeout: u64,
}

/// 数据文件配置
///
/// 训练数据提供特征列（症状目录）与预后标签；主数据提供症状严重度、
/// 症状/疾病描述与疾病预防建议。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DataConfig {
    /// 训练集 CSV 路径
    pub training_csv: PathBuf,
    /// 测试集 CSV 路径（仅用于报告准确率）
    pub testing_csv: PathBuf,
    /// 症状严重度 CSV 路径
    pub severity_csv: PathBuf,
    /// 描述 CSV 路径
    pub description_csv: PathBuf,
    /// 疾病预防建议 CSV 路径
    pub precaution_csv: PathBuf,
    /// 留出集比例（用于准确率评估）
    pub test_size: f64,
    /// 数据划分随机种子
    pub split_seed: u64,
}

/// 诊断引擎配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// 单次会话最多确认的症状数
    pub max_confirmed_symptoms: usize,
    /// 症状选择随机种子（None 表示使用系统熵）
    pub selector_seed: Option<u64>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 数据文件配置
    pub data: DataConfig,
    /// 诊断引擎配置
    pub engine: EngineConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 5000,
                request_timeout: 30,
            },
            data: DataConfig {
                training_csv: PathBuf::from("Data/Training.csv"),
                testing_csv: PathBuf::from("Data/Testing.csv"),
                severity_csv: PathBuf::from("MasterData/symptom_severity.csv"),
                description_csv: PathBuf::from("MasterData/symptom_Description.csv"),
                precaution_csv: PathBuf::from("MasterData/symptom_precaution.csv"),
                test_size: 0.33,
                split_seed: 42,
            },
            engine: EngineConfig {
                max_confirmed_symptoms: 10,
                selector_seed: None,
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
            },
            app_name: "medibot".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config
    }
}
