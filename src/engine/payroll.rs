// ==========================================
// 学校组织数据管理 - 薪资计算引擎
// ==========================================
// 职责: 批量计算教职工薪资（缓存到 calculated_salary）并生成扁平薪资行
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::person::Person;
use crate::importer::salary_export::SalaryRow;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 薪资汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollSummary {
    pub rows: Vec<SalaryRow>,
    pub total_payroll: f64,
}

pub struct PayrollEngine;

impl PayrollEngine {
    /// 初始化名单（不计算薪资）
    pub fn roster_rows(staff: &[Employee]) -> Vec<SalaryRow> {
        staff.iter().map(SalaryRow::from_employee).collect()
    }

    /// 计算全部薪资
    #[instrument(skip_all, fields(staff = staff.len()))]
    pub fn calculate(staff: &mut [Employee]) -> PayrollSummary {
        let mut total_payroll = 0.0;
        let rows = staff
            .iter_mut()
            .map(|employee| {
                let salary = employee.refresh_salary();
                total_payroll += salary;
                tracing::debug!(
                    employee = %employee.full_name(),
                    position = %employee.position(),
                    salary,
                    "薪资已计算"
                );
                SalaryRow {
                    calculated_salary: Some(salary),
                    ..SalaryRow::from_employee(employee)
                }
            })
            .collect();

        tracing::info!(total_payroll, "薪资计算完成");
        PayrollSummary {
            rows,
            total_payroll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::employee::{default_staff, BaseSalaryTable};

    #[test]
    fn test_calculate_default_staff() {
        let mut staff = default_staff(&BaseSalaryTable::default());
        let summary = PayrollEngine::calculate(&mut staff);

        let salaries: Vec<f64> = summary
            .rows
            .iter()
            .map(|r| r.calculated_salary.unwrap())
            .collect();
        assert_eq!(salaries, vec![12500.0, 6000.0, 1200.0, 12250.0]);
        assert_eq!(summary.total_payroll, 31950.0);
        assert!(staff.iter().all(|e| e.calculated_salary().is_some()));
    }

    #[test]
    fn test_roster_rows_have_no_salary() {
        let staff = default_staff(&BaseSalaryTable::default());
        let rows = PayrollEngine::roster_rows(&staff);
        assert!(rows.iter().all(|r| r.calculated_salary.is_none()));
        assert_eq!(rows[0].management_experience, Some(10));
    }
}
