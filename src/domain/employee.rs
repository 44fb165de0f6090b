// ==========================================
// 学校组织数据管理 - 教职工领域模型
// ==========================================
// 岗位: 校长 / 教师 / 保安
// 薪资: 按岗位变体分派计算（SalaryCalculation）
// ==========================================

use crate::domain::person::{Person, PersonName};
use crate::domain::types::Position;
use serde::{Deserialize, Serialize};

// ==========================================
// BaseSalaryTable - 岗位基础工资表
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseSalaryTable {
    pub director: f64,
    pub teacher: f64,
    pub security_guard: f64,
    /// 未知岗位代码的兜底金额
    pub fallback: f64,
}

impl Default for BaseSalaryTable {
    fn default() -> Self {
        Self {
            director: 15000.0,
            teacher: 12000.0,
            security_guard: 11000.0,
            fallback: 10000.0,
        }
    }
}

impl BaseSalaryTable {
    pub fn amount_for(&self, position: Position) -> f64 {
        match position {
            Position::Director => self.director,
            Position::Teacher => self.teacher,
            Position::SecurityGuard => self.security_guard,
        }
    }

    /// 按岗位代码查询，未知代码返回 fallback
    pub fn amount_for_code(&self, code: &str) -> f64 {
        match Position::from_code(code) {
            Some(position) => self.amount_for(position),
            None => {
                tracing::warn!(code, fallback = self.fallback, "未知岗位代码，使用兜底基础工资");
                self.fallback
            }
        }
    }
}

// ==========================================
// EmployeeRole - 岗位变体及其工龄字段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeRole {
    Teacher {
        pedagogical_experience_years: i32,
    },
    /// 校长沿用教师的教龄字段，另加管理年限
    Director {
        pedagogical_experience_years: i32,
        management_experience_years: i32,
    },
    SecurityGuard {
        total_experience_years: i32,
    },
}

impl EmployeeRole {
    pub fn position(&self) -> Position {
        match self {
            EmployeeRole::Teacher { .. } => Position::Teacher,
            EmployeeRole::Director { .. } => Position::Director,
            EmployeeRole::SecurityGuard { .. } => Position::SecurityGuard,
        }
    }

    pub fn pedagogical_experience_years(&self) -> Option<i32> {
        match self {
            EmployeeRole::Teacher {
                pedagogical_experience_years,
            }
            | EmployeeRole::Director {
                pedagogical_experience_years,
                ..
            } => Some(*pedagogical_experience_years),
            EmployeeRole::SecurityGuard { .. } => None,
        }
    }

    pub fn management_experience_years(&self) -> Option<i32> {
        match self {
            EmployeeRole::Director {
                management_experience_years,
                ..
            } => Some(*management_experience_years),
            _ => None,
        }
    }

    pub fn total_experience_years(&self) -> Option<i32> {
        match self {
            EmployeeRole::SecurityGuard {
                total_experience_years,
            } => Some(*total_experience_years),
            _ => None,
        }
    }
}

// ==========================================
// Employee - 教职工
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    name: PersonName,
    role: EmployeeRole,
    base_salary: f64,
    /// 最近一次计算结果（不持久化）
    #[serde(skip)]
    calculated_salary: Option<f64>,
}

impl Employee {
    /// 按岗位表创建教职工，基础工资取对应档位
    pub fn new(name: PersonName, role: EmployeeRole, table: &BaseSalaryTable) -> Self {
        Self {
            name,
            role,
            base_salary: table.amount_for(role.position()),
            calculated_salary: None,
        }
    }

    pub fn teacher(name: PersonName, pedagogical_experience_years: i32, table: &BaseSalaryTable) -> Self {
        Self::new(
            name,
            EmployeeRole::Teacher {
                pedagogical_experience_years,
            },
            table,
        )
    }

    pub fn director(
        name: PersonName,
        pedagogical_experience_years: i32,
        management_experience_years: i32,
        table: &BaseSalaryTable,
    ) -> Self {
        Self::new(
            name,
            EmployeeRole::Director {
                pedagogical_experience_years,
                management_experience_years,
            },
            table,
        )
    }

    pub fn security_guard(name: PersonName, total_experience_years: i32, table: &BaseSalaryTable) -> Self {
        Self::new(
            name,
            EmployeeRole::SecurityGuard {
                total_experience_years,
            },
            table,
        )
    }

    pub fn role(&self) -> &EmployeeRole {
        &self.role
    }

    pub fn position(&self) -> Position {
        self.role.position()
    }

    pub fn base_salary(&self) -> f64 {
        self.base_salary
    }

    pub fn calculated_salary(&self) -> Option<f64> {
        self.calculated_salary
    }

    /// 计算并缓存薪资
    pub fn refresh_salary(&mut self) -> f64 {
        let salary = self.calculate_salary();
        self.calculated_salary = Some(salary);
        salary
    }
}

impl Person for Employee {
    fn name(&self) -> &PersonName {
        &self.name
    }
}

// ==========================================
// Trait: SalaryCalculation
// ==========================================
pub trait SalaryCalculation {
    /// 计算月薪（纯函数，不修改自身）
    fn calculate_salary(&self) -> f64;
}

impl SalaryCalculation for Employee {
    /// # 公式
    /// - 教师: base * max(教龄,1) / 30
    /// - 校长: base * max(教龄,1) / 50 + 管理年限 * 500
    /// - 保安: base + 总工龄 * 250
    fn calculate_salary(&self) -> f64 {
        match self.role {
            EmployeeRole::Teacher {
                pedagogical_experience_years,
            } => self.base_salary * effective_years(pedagogical_experience_years) / 30.0,
            EmployeeRole::Director {
                pedagogical_experience_years,
                management_experience_years,
            } => {
                self.base_salary * effective_years(pedagogical_experience_years) / 50.0
                    + f64::from(management_experience_years) * 500.0
            }
            EmployeeRole::SecurityGuard {
                total_experience_years,
            } => self.base_salary + f64::from(total_experience_years) * 250.0,
        }
    }
}

/// 非正工龄按 1 年计
fn effective_years(years: i32) -> f64 {
    f64::from(years.max(1))
}

// ==========================================
// 默认教职工名单（未提供外部数据时使用）
// ==========================================
pub fn default_staff(table: &BaseSalaryTable) -> Vec<Employee> {
    vec![
        Employee::director(PersonName::new("Іваненко", "Максим", "Олегович"), 25, 10, table),
        Employee::teacher(PersonName::new("Савчук", "Вікторія", "Павлівна"), 15, table),
        Employee::teacher(PersonName::new("Коваль", "Андрій", "Михайлович"), 3, table),
        Employee::security_guard(PersonName::new("Гнатюк", "Сергій", "Васильович"), 5, table),
    ]
}
