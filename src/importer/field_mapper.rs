// ==========================================
// 学校组织数据管理 - 字段映射器实现
// ==========================================
// 职责: 类型化行 → 班级名单/学生/教职工记录
// 规则: 必填字段缺失或无法转换 → 报错（携带行号与字段名）
// ==========================================

use crate::domain::employee::EmployeeRole;
use crate::domain::person::PersonName;
use crate::domain::types::Position;
use crate::importer::cell::{CellValue, TabularRow};
use crate::importer::error::{ImportError, ImportResult, RecordKind};
use crate::importer::importer_trait::RecordMapper;
use crate::importer::records::{RosterRecord, StaffRecord, StudentRecord};

// ==========================================
// 字段名常量
// ==========================================
pub mod fields {
    pub const PARALLEL: &str = "parallel";
    pub const VERTICAL: &str = "vertical";
    pub const LAST_NAME: &str = "last_name";
    pub const FIRST_NAME: &str = "first_name";
    pub const MIDDLE_NAME: &str = "middle_name";
    pub const BIRTH_YEAR: &str = "birth_year";
    pub const GENDER: &str = "gender";
    pub const AVERAGE_GRADE: &str = "average_grade";
    pub const POSITION: &str = "position";
    pub const PEDAGOGICAL_EXPERIENCE: &str = "pedagogical_experience";
    pub const MANAGEMENT_EXPERIENCE: &str = "management_experience";
    pub const TOTAL_EXPERIENCE: &str = "total_experience";
}

// ==========================================
// FieldReader - 单行字段读取
// ==========================================
struct FieldReader<'a> {
    kind: RecordKind,
    row: &'a TabularRow,
    row_number: usize,
}

impl<'a> FieldReader<'a> {
    fn new(kind: RecordKind, row: &'a TabularRow, row_number: usize) -> Self {
        Self {
            kind,
            row,
            row_number,
        }
    }

    fn cell(&self, field: &str) -> ImportResult<&'a CellValue> {
        self.row.get(field).ok_or_else(|| ImportError::MissingField {
            kind: self.kind,
            row: self.row_number,
            field: field.to_string(),
        })
    }

    /// 可选字段：缺失或空文本返回 None
    fn optional_cell(&self, field: &str) -> Option<&'a CellValue> {
        match self.row.get(field) {
            Some(CellValue::Text(s)) if s.trim().is_empty() => None,
            other => other,
        }
    }

    fn conversion_error(&self, field: &str, message: String) -> ImportError {
        ImportError::TypeConversionError {
            kind: self.kind,
            row: self.row_number,
            field: field.to_string(),
            message,
        }
    }

    fn text(&self, field: &str) -> ImportResult<String> {
        Ok(self.cell(field)?.as_text())
    }

    fn int(&self, field: &str) -> ImportResult<i32> {
        let cell = self.cell(field)?;
        self.int_from(field, cell)
    }

    fn int_from(&self, field: &str, cell: &CellValue) -> ImportResult<i32> {
        cell.as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| self.conversion_error(field, format!("无法解析为整数: {}", cell)))
    }

    fn optional_int(&self, field: &str) -> ImportResult<Option<i32>> {
        match self.optional_cell(field) {
            None => Ok(None),
            Some(cell) => self.int_from(field, cell).map(Some),
        }
    }

    fn required_int(&self, field: &str, value: Option<i32>) -> ImportResult<i32> {
        value.ok_or_else(|| ImportError::MissingField {
            kind: self.kind,
            row: self.row_number,
            field: field.to_string(),
        })
    }

    fn float(&self, field: &str) -> ImportResult<f64> {
        let cell = self.cell(field)?;
        cell.as_f64()
            .ok_or_else(|| self.conversion_error(field, format!("无法解析为浮点数: {}", cell)))
    }
}

// ==========================================
// RosterFieldMapper - 班级名单
// ==========================================
pub struct RosterFieldMapper;

impl RecordMapper for RosterFieldMapper {
    type Record = RosterRecord;

    fn map_row(&self, row: &TabularRow, row_number: usize) -> ImportResult<RosterRecord> {
        let reader = FieldReader::new(RecordKind::Roster, row, row_number);
        Ok(RosterRecord {
            parallel: reader.int(fields::PARALLEL)?,
            vertical: reader.text(fields::VERTICAL)?,
        })
    }
}

// ==========================================
// StudentFieldMapper - 学生
// ==========================================
pub struct StudentFieldMapper;

impl RecordMapper for StudentFieldMapper {
    type Record = StudentRecord;

    fn map_row(&self, row: &TabularRow, row_number: usize) -> ImportResult<StudentRecord> {
        let reader = FieldReader::new(RecordKind::Student, row, row_number);
        Ok(StudentRecord {
            last_name: reader.text(fields::LAST_NAME)?,
            first_name: reader.text(fields::FIRST_NAME)?,
            middle_name: reader.text(fields::MIDDLE_NAME)?,
            birth_year: reader.int(fields::BIRTH_YEAR)?,
            gender: reader.text(fields::GENDER)?,
            average_grade: reader.float(fields::AVERAGE_GRADE)?,
            parallel: reader.int(fields::PARALLEL)?,
            vertical: reader.text(fields::VERTICAL)?,
        })
    }
}

// ==========================================
// StaffFieldMapper - 教职工
// ==========================================
// 岗位决定必填的工龄字段:
// - Teacher: pedagogical_experience
// - Director: pedagogical_experience + management_experience
// - SecurityGuard: total_experience
pub struct StaffFieldMapper;

impl RecordMapper for StaffFieldMapper {
    type Record = StaffRecord;

    fn map_row(&self, row: &TabularRow, row_number: usize) -> ImportResult<StaffRecord> {
        let reader = FieldReader::new(RecordKind::Staff, row, row_number);

        let name = PersonName::new(
            reader.text(fields::LAST_NAME)?,
            reader.text(fields::FIRST_NAME)?,
            reader.text(fields::MIDDLE_NAME)?,
        );

        let position_code = reader.text(fields::POSITION)?;
        let position =
            Position::from_code(&position_code).ok_or_else(|| ImportError::UnknownPosition {
                row: row_number,
                value: position_code.clone(),
            })?;

        let pedagogical = reader.optional_int(fields::PEDAGOGICAL_EXPERIENCE)?;
        let management = reader.optional_int(fields::MANAGEMENT_EXPERIENCE)?;
        let total = reader.optional_int(fields::TOTAL_EXPERIENCE)?;

        let role = match position {
            Position::Teacher => EmployeeRole::Teacher {
                pedagogical_experience_years: reader
                    .required_int(fields::PEDAGOGICAL_EXPERIENCE, pedagogical)?,
            },
            Position::Director => EmployeeRole::Director {
                pedagogical_experience_years: reader
                    .required_int(fields::PEDAGOGICAL_EXPERIENCE, pedagogical)?,
                management_experience_years: reader
                    .required_int(fields::MANAGEMENT_EXPERIENCE, management)?,
            },
            Position::SecurityGuard => EmployeeRole::SecurityGuard {
                total_experience_years: reader.required_int(fields::TOTAL_EXPERIENCE, total)?,
            },
        };

        Ok(StaffRecord { name, role })
    }
}
