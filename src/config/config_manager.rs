// ==========================================
// 学校组织数据管理 - 配置管理器
// ==========================================
// 职责: 配置文件定位、加载、校验
// 查找顺序:
//   1. 显式路径
//   2. 环境变量 SCHOOL_REGISTRY_CONFIG
//   3. 用户配置目录/school-registry/config.json
// 文件不存在 → 使用默认配置
// ==========================================

use crate::config::school_config::SchoolConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ==========================================
// 配置键 / 环境变量
// ==========================================
pub mod config_keys {
    /// 配置文件路径环境变量
    pub const CONFIG_PATH_ENV: &str = "SCHOOL_REGISTRY_CONFIG";

    /// 配置目录名
    pub const APP_DIR_NAME: &str = "school-registry";

    /// 配置文件名
    pub const CONFIG_FILE_NAME: &str = "config.json";
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值无效 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("配置文件写入失败 ({path}): {message}")]
    WriteError { path: String, message: String },
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    path: Option<PathBuf>,
}

impl ConfigManager {
    /// 使用显式路径
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// 按环境变量 / 用户配置目录定位
    pub fn from_env() -> Self {
        Self {
            path: default_config_path(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// 加载配置
    ///
    /// # 返回
    /// - Ok(SchoolConfig): 文件内容（缺失字段取默认值）；文件不存在时为默认配置
    /// - Err(ConfigError): 读取/解析/校验失败
    pub fn load(&self) -> Result<SchoolConfig, ConfigError> {
        let path = match &self.path {
            Some(p) if p.exists() => p,
            Some(p) => {
                tracing::info!(path = %p.display(), "配置文件不存在，使用默认配置");
                return Ok(SchoolConfig::default());
            }
            None => {
                tracing::info!("未找到配置目录，使用默认配置");
                return Ok(SchoolConfig::default());
            }
        };

        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: SchoolConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        validate(&config)?;
        tracing::info!(path = %path.display(), school = %config.school_name, "配置加载完成");
        Ok(config)
    }

    /// 保存配置（格式化 JSON）
    pub fn save(&self, config: &SchoolConfig) -> Result<(), ConfigError> {
        validate(config)?;

        let path = self.path.as_ref().ok_or_else(|| ConfigError::WriteError {
            path: String::new(),
            message: "未指定配置文件路径".to_string(),
        })?;
        let write_error = |message: String| ConfigError::WriteError {
            path: path.display().to_string(),
            message,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(config).map_err(|e| write_error(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| write_error(e.to_string()))?;
        Ok(())
    }
}

/// 默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(config_keys::CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    dirs::config_dir().map(|dir| {
        dir.join(config_keys::APP_DIR_NAME)
            .join(config_keys::CONFIG_FILE_NAME)
    })
}

/// 工资金额必须为有限非负数
fn validate(config: &SchoolConfig) -> Result<(), ConfigError> {
    let table = &config.base_salaries;
    let amounts = [
        ("base_salaries.director", table.director),
        ("base_salaries.teacher", table.teacher),
        ("base_salaries.security_guard", table.security_guard),
        ("base_salaries.fallback", table.fallback),
    ];

    for (key, value) in amounts {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                message: "工资金额必须为非负数".to_string(),
            });
        }
    }

    if config.school_name.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "school_name".to_string(),
            value: config.school_name.clone(),
            message: "学校名称不能为空".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::new(dir.path().join("absent.json"));
        assert_eq!(manager.load().unwrap(), SchoolConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"school_name": "Ліцей №1", "base_salaries": {"teacher": 13000.0}}"#)
            .unwrap();

        let config = ConfigManager::new(&path).load().unwrap();

        assert_eq!(config.school_name, "Ліцей №1");
        assert_eq!(config.base_salaries.teacher, 13000.0);
        assert_eq!(config.base_salaries.director, 15000.0);
        assert_eq!(config.locale, "uk");
    }

    #[test]
    fn test_negative_salary_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"base_salaries": {"director": -1.0}}"#).unwrap();

        let err = ConfigManager::new(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            ConfigManager::new(&path).load(),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::new(dir.path().join("nested").join("config.json"));
        let mut config = SchoolConfig::default();
        config.locale = "en".to_string();

        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap().locale, "en");
    }
}
