// ==========================================
// 学校组织数据管理 - 应用状态
// ==========================================
// 职责: 管理应用级别的配置与 API 实例
// ==========================================

use std::path::{Path, PathBuf};

use crate::api::{ApiResult, PayrollApi, SchoolSession};
use crate::config::{ConfigManager, SchoolConfig};
use crate::i18n;

/// 薪资表默认文件名
pub const DEFAULT_SALARY_FILE: &str = "salaries.csv";

/// 应用状态
///
/// 包含当前配置、学校会话和薪资 API
pub struct AppState {
    /// 已加载的配置
    pub config: SchoolConfig,

    /// 学校会话
    pub session: SchoolSession,

    /// 薪资API（默认教职工名单）
    pub payroll: PayrollApi,
}

impl AppState {
    /// 按给定配置创建应用状态
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 切换界面语言
    /// 2. 创建学校会话
    /// 3. 按配置的岗位工资表创建薪资API
    pub fn new(config: SchoolConfig) -> Self {
        tracing::info!(
            school = %config.school_name,
            locale = %config.locale,
            "初始化AppState"
        );
        i18n::set_locale(&config.locale);

        Self {
            session: SchoolSession::new(config.school_name.clone()),
            payroll: PayrollApi::new(config.base_salaries),
            config,
        }
    }

    /// 从环境变量指定（或默认位置）的配置文件创建
    pub fn from_env() -> ApiResult<Self> {
        let manager = ConfigManager::from_env();
        let config = manager.load()?;
        Ok(Self::new(config))
    }

    /// 使用外部教职工文件替换默认名单
    pub fn load_staff_file<P: AsRef<Path>>(&mut self, path: P) -> ApiResult<()> {
        self.payroll = PayrollApi::from_staff_file(path, self.config.base_salaries)?;
        Ok(())
    }

    /// 薪资表导出路径
    pub fn salary_export_path(&self) -> PathBuf {
        default_export_path(&self.config, DEFAULT_SALARY_FILE)
    }
}

/// 获取默认导出路径
///
/// 优先级: 配置 export_dir → 用户文档目录/school-registry → 当前目录
pub fn default_export_path(config: &SchoolConfig, file_name: &str) -> PathBuf {
    if let Some(dir) = &config.export_dir {
        return dir.join(file_name);
    }

    match dirs::document_dir() {
        Some(doc_dir) => {
            let dir = doc_dir.join("school-registry");
            // 目录创建失败时仍返回路径，由写入阶段报告错误
            if let Err(e) = std::fs::create_dir_all(&dir) {
                tracing::warn!("导出目录创建失败: {}", e);
            }
            dir.join(file_name)
        }
        None => PathBuf::from(".").join(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_export_path_prefers_configured_dir() {
        let dir = TempDir::new().unwrap();
        let config = SchoolConfig {
            export_dir: Some(dir.path().to_path_buf()),
            ..SchoolConfig::default()
        };
        let path = default_export_path(&config, DEFAULT_SALARY_FILE);
        assert_eq!(path, dir.path().join("salaries.csv"));
    }

    #[test]
    fn test_state_uses_configured_school_name() {
        let config = SchoolConfig {
            school_name: "Ліцей №7".to_string(),
            ..SchoolConfig::default()
        };
        let state = AppState::new(config);
        assert_eq!(state.session.school().name(), "Ліцей №7");
        assert_eq!(state.payroll.staff().len(), 4);
    }
}
