// ==========================================
// 学校组织数据管理 - 配置层
// ==========================================
// 职责: 系统配置加载（学校名称、语言、岗位工资表、导出目录）
// 存储: JSON 配置文件
// ==========================================

pub mod config_manager;
pub mod school_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, default_config_path, ConfigError, ConfigManager};
pub use school_config::{SchoolConfig, DEFAULT_LOCALE, DEFAULT_SCHOOL_NAME};
