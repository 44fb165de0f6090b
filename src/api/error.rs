// ==========================================
// 学校组织数据管理 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换导入/配置错误为用户可读的消息
// ==========================================

use crate::config::ConfigError;
use crate::i18n::{t, t_with_args};
use crate::importer::error::{ImportError, RecordKind};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 会话状态错误
    // ==========================================
    #[error("尚未装载学校数据")]
    DataNotLoaded,

    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 导入/导出错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("薪资表导出失败: {0}")]
    ExportError(String),

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 错误代码（供展示层区分处理）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::DataNotLoaded => "DATA_NOT_LOADED",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::Import(e) => match e.record_kind() {
                Some(RecordKind::Roster) => "ROSTER_FORMAT_ERROR",
                Some(RecordKind::Student) => "STUDENT_FORMAT_ERROR",
                Some(RecordKind::Staff) => "STAFF_FORMAT_ERROR",
                None => "IMPORT_ERROR",
            },
            ApiError::ExportError(_) => "EXPORT_ERROR",
            ApiError::Config(_) => "CONFIG_ERROR",
            ApiError::Other(_) => "OTHER_ERROR",
        }
    }

    /// 本地化的用户提示
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Import(e) => match e.record_kind() {
                Some(RecordKind::Roster) => t("load.roster_error"),
                Some(RecordKind::Student) => t("load.students_error"),
                _ => t_with_args("load.file_error", &[("error", &e.to_string())]),
            },
            other => other.to_string(),
        }
    }
}

/// API Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
