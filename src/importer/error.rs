// ==========================================
// 学校组织数据管理 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 记录类别（用于定位出错的导入阶段）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    Roster,
    Student,
    Staff,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Roster => write!(f, "班级名单"),
            RecordKind::Student => write!(f, "学生"),
            RecordKind::Staff => write!(f, "教职工"),
        }
    }
}

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("CSV 写入失败: {0}")]
    CsvWriteError(String),

    // ===== 记录映射错误 =====
    #[error("{kind}记录缺少字段 (行 {row}): {field}")]
    MissingField {
        kind: RecordKind,
        row: usize,
        field: String,
    },

    #[error("{kind}记录类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        kind: RecordKind,
        row: usize,
        field: String,
        message: String,
    },

    #[error("未知岗位 (行 {row}): {value}")]
    UnknownPosition { row: usize, value: String },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 出错的记录类别（文件级错误返回 None）
    pub fn record_kind(&self) -> Option<RecordKind> {
        match self {
            ImportError::MissingField { kind, .. }
            | ImportError::TypeConversionError { kind, .. } => Some(*kind),
            ImportError::UnknownPosition { .. } => Some(RecordKind::Staff),
            _ => None,
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
