// ==========================================
// 学校组织数据管理 - 导入/导出层
// ==========================================
// 职责: 表格文件读取、单元格类型转换、字段映射、薪资表导出
// 支持: Excel, CSV
// ==========================================

pub mod cell;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod records;
pub mod salary_export;

// 重导出核心类型
pub use cell::{coerce_row, coerce_rows, CellValue, TabularRow};
pub use error::{ImportError, ImportResult, RecordKind};
pub use field_mapper::{RosterFieldMapper, StaffFieldMapper, StudentFieldMapper};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use records::{RosterRecord, StaffRecord, StudentRecord};
pub use salary_export::{SalaryColumn, SalaryCsvWriter, SalaryRow};

// 重导出 Trait 接口
pub use importer_trait::{FileParser, RecordMapper};
