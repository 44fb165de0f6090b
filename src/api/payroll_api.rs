// ==========================================
// 学校组织数据管理 - 薪资 API
// ==========================================
// 职责: 教职工名单（默认名单或外部文件）、薪资计算、CSV 导出
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::employee::{default_staff, BaseSalaryTable, Employee};
use crate::engine::payroll::{PayrollEngine, PayrollSummary};
use crate::importer::field_mapper::StaffFieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::RecordMapper;
use crate::importer::salary_export::{SalaryCsvWriter, SalaryRow};
use std::path::Path;

pub struct PayrollApi {
    salary_table: BaseSalaryTable,
    staff: Vec<Employee>,
}

impl PayrollApi {
    /// 使用默认教职工名单
    pub fn new(salary_table: BaseSalaryTable) -> Self {
        Self {
            staff: default_staff(&salary_table),
            salary_table,
        }
    }

    /// 从教职工文件加载名单（CSV 或 Excel）
    pub fn from_staff_file<P: AsRef<Path>>(
        path: P,
        salary_table: BaseSalaryTable,
    ) -> ApiResult<Self> {
        let rows = UniversalFileParser.parse_typed(path)?;
        let records = StaffFieldMapper.map_rows(&rows)?;
        if records.is_empty() {
            return Err(ApiError::InvalidInput("教职工名单为空".to_string()));
        }

        let staff = records
            .into_iter()
            .map(|record| Employee::new(record.name, record.role, &salary_table))
            .collect::<Vec<_>>();
        tracing::info!(staff = staff.len(), "教职工名单加载完成");

        Ok(Self {
            salary_table,
            staff,
        })
    }

    pub fn salary_table(&self) -> &BaseSalaryTable {
        &self.salary_table
    }

    pub fn staff(&self) -> &[Employee] {
        &self.staff
    }

    /// 初始化名单（未计算薪资）
    pub fn roster_rows(&self) -> Vec<SalaryRow> {
        PayrollEngine::roster_rows(&self.staff)
    }

    /// 计算薪资
    pub fn calculate(&mut self) -> PayrollSummary {
        PayrollEngine::calculate(&mut self.staff)
    }

    /// 计算并导出薪资表
    ///
    /// # 返回
    /// - Ok(PayrollSummary): 本次计算结果（即写入文件的内容）
    pub fn export_csv<P: AsRef<Path>>(&mut self, path: P) -> ApiResult<PayrollSummary> {
        let summary = self.calculate();
        SalaryCsvWriter
            .write_file(&summary.rows, path.as_ref())
            .map_err(|e| ApiError::ExportError(e.to_string()))?;
        Ok(summary)
    }

    /// 计算并导出为内存内容（下载场景）
    pub fn export_bytes(&mut self) -> ApiResult<Vec<u8>> {
        let summary = self.calculate();
        SalaryCsvWriter
            .to_bytes(&summary.rows)
            .map_err(|e| ApiError::ExportError(e.to_string()))
    }
}
