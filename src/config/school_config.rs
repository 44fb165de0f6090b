use crate::domain::employee::BaseSalaryTable;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 默认学校名称
pub const DEFAULT_SCHOOL_NAME: &str = "Гімназія 'Прогрес'";

/// 默认界面语言
pub const DEFAULT_LOCALE: &str = "uk";

/// 系统配置（JSON 文件）
///
/// 缺失字段取默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchoolConfig {
    /// 学校名称
    pub school_name: String,

    /// 界面语言（uk / en / zh-CN）
    pub locale: String,

    /// 岗位基础工资表
    pub base_salaries: BaseSalaryTable,

    /// 薪资表导出目录（可选）
    pub export_dir: Option<PathBuf>,
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self {
            school_name: DEFAULT_SCHOOL_NAME.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            base_salaries: BaseSalaryTable::default(),
            export_dir: None,
        }
    }
}
