// ==========================================
// 学校组织数据管理 - 薪资表 CSV 导出
// ==========================================
// 列白名单（固定顺序）:
//   ПІБ, Посада, Базова Ставка, Розрахована Зарплата (грн),
//   Педагогічний Стаж, Стаж Керування, Загальний Досвід
// 规则: 至少一行包含该字段的列才输出；行内缺失字段输出空串
// ==========================================

use crate::domain::employee::{Employee, SalaryCalculation};
use crate::domain::person::Person;
use crate::importer::error::{ImportError, ImportResult};
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

// ==========================================
// 列定义
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryColumn {
    FullName,
    Position,
    BaseSalary,
    CalculatedSalary,
    PedagogicalExperience,
    ManagementExperience,
    TotalExperience,
}

impl SalaryColumn {
    /// 固定输出顺序
    pub const ORDERED: [SalaryColumn; 7] = [
        SalaryColumn::FullName,
        SalaryColumn::Position,
        SalaryColumn::BaseSalary,
        SalaryColumn::CalculatedSalary,
        SalaryColumn::PedagogicalExperience,
        SalaryColumn::ManagementExperience,
        SalaryColumn::TotalExperience,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            SalaryColumn::FullName => "ПІБ",
            SalaryColumn::Position => "Посада",
            SalaryColumn::BaseSalary => "Базова Ставка",
            SalaryColumn::CalculatedSalary => "Розрахована Зарплата (грн)",
            SalaryColumn::PedagogicalExperience => "Педагогічний Стаж",
            SalaryColumn::ManagementExperience => "Стаж Керування",
            SalaryColumn::TotalExperience => "Загальний Досвід",
        }
    }
}

// ==========================================
// SalaryRow - 扁平薪资行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRow {
    pub full_name: String,
    pub position: String,
    pub base_salary: f64,
    /// 未计算时为 None（仅展示初始化名单）
    pub calculated_salary: Option<f64>,
    pub pedagogical_experience: Option<i32>,
    pub management_experience: Option<i32>,
    pub total_experience: Option<i32>,
}

impl SalaryRow {
    /// 教职工名单行（不含计算薪资）
    pub fn from_employee(employee: &Employee) -> Self {
        let role = employee.role();
        Self {
            full_name: employee.full_name(),
            position: employee.position().to_string(),
            base_salary: employee.base_salary(),
            calculated_salary: None,
            pedagogical_experience: role.pedagogical_experience_years(),
            management_experience: role.management_experience_years(),
            total_experience: role.total_experience_years(),
        }
    }

    /// 含计算薪资的行
    pub fn with_salary(employee: &Employee) -> Self {
        Self {
            calculated_salary: Some(employee.calculate_salary()),
            ..Self::from_employee(employee)
        }
    }

    fn has(&self, column: SalaryColumn) -> bool {
        match column {
            SalaryColumn::FullName | SalaryColumn::Position | SalaryColumn::BaseSalary => true,
            SalaryColumn::CalculatedSalary => self.calculated_salary.is_some(),
            SalaryColumn::PedagogicalExperience => self.pedagogical_experience.is_some(),
            SalaryColumn::ManagementExperience => self.management_experience.is_some(),
            SalaryColumn::TotalExperience => self.total_experience.is_some(),
        }
    }

    fn render(&self, column: SalaryColumn) -> String {
        fn opt<T: ToString>(v: Option<T>) -> String {
            v.map(|x| x.to_string()).unwrap_or_default()
        }

        match column {
            SalaryColumn::FullName => self.full_name.clone(),
            SalaryColumn::Position => self.position.clone(),
            SalaryColumn::BaseSalary => format!("{:?}", self.base_salary),
            SalaryColumn::CalculatedSalary => self
                .calculated_salary
                .map(|s| format!("{:.2}", s))
                .unwrap_or_default(),
            SalaryColumn::PedagogicalExperience => opt(self.pedagogical_experience),
            SalaryColumn::ManagementExperience => opt(self.management_experience),
            SalaryColumn::TotalExperience => opt(self.total_experience),
        }
    }
}

/// 实际输出的列（白名单顺序，且至少一行包含该字段）
pub fn active_columns(rows: &[SalaryRow]) -> Vec<SalaryColumn> {
    SalaryColumn::ORDERED
        .iter()
        .copied()
        .filter(|column| rows.iter().any(|row| row.has(*column)))
        .collect()
}

// ==========================================
// SalaryCsvWriter
// ==========================================
pub struct SalaryCsvWriter;

impl SalaryCsvWriter {
    /// 写入任意输出流；空输入不写任何内容
    pub fn write<W: Write>(&self, rows: &[SalaryRow], sink: W) -> ImportResult<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let columns = active_columns(rows);
        let mut writer = WriterBuilder::new().from_writer(sink);

        writer
            .write_record(columns.iter().map(|c| c.header()))
            .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;

        for row in rows {
            writer
                .write_record(columns.iter().map(|c| row.render(*c)))
                .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;
        }

        writer
            .flush()
            .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;
        Ok(())
    }

    /// 写入文件（覆盖）
    pub fn write_file<P: AsRef<Path>>(&self, rows: &[SalaryRow], path: P) -> ImportResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let file = std::fs::File::create(path.as_ref())?;
        self.write(rows, file)?;
        tracing::info!(path = %path.as_ref().display(), rows = rows.len(), "薪资表已导出");
        Ok(())
    }

    /// 写入内存（下载等场景）
    pub fn to_bytes(&self, rows: &[SalaryRow]) -> ImportResult<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(rows, &mut buffer)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::employee::{default_staff, BaseSalaryTable};

    fn render(rows: &[SalaryRow]) -> String {
        String::from_utf8(SalaryCsvWriter.to_bytes(rows).unwrap()).unwrap()
    }

    #[test]
    fn test_empty_rows_write_nothing() {
        assert!(SalaryCsvWriter.to_bytes(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_columns_follow_allow_list_order() {
        let staff = default_staff(&BaseSalaryTable::default());
        let rows: Vec<SalaryRow> = staff.iter().map(SalaryRow::with_salary).collect();

        let output = render(&rows);
        let mut lines = output.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ПІБ,Посада,Базова Ставка,Розрахована Зарплата (грн),Педагогічний Стаж,Стаж Керування,Загальний Досвід"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Іваненко Максим Олегович,Director,15000.0,12500.00,25,10,"
        );
        assert_eq!(
            lines.nth(2).unwrap(),
            "Гнатюк Сергій Васильович,SecurityGuard,11000.0,12250.00,,,5"
        );
    }

    #[test]
    fn test_columns_absent_from_every_row_are_dropped() {
        let staff = default_staff(&BaseSalaryTable::default());
        let rows: Vec<SalaryRow> = staff[1..3].iter().map(SalaryRow::from_employee).collect();

        let output = render(&rows);
        assert_eq!(
            output.lines().next().unwrap(),
            "ПІБ,Посада,Базова Ставка,Педагогічний Стаж"
        );
        assert_eq!(
            output.lines().nth(1).unwrap(),
            "Савчук Вікторія Павлівна,Teacher,12000.0,15"
        );
    }
}
