// ==========================================
// 学校组织数据管理 - 领域模型层
// ==========================================
// 职责: 定义人员、学生、班级、教职工与学校聚合根
// 红线: 不含文件读写逻辑，不含统计/图表聚合逻辑
// ==========================================

pub mod employee;
pub mod person;
pub mod school;
pub mod school_class;
pub mod student;
pub mod types;

// 重导出核心类型
pub use employee::{default_staff, BaseSalaryTable, Employee, EmployeeRole, SalaryCalculation};
pub use person::{Person, PersonName};
pub use school::{GraduatedClass, PromotionReport, School};
pub use school_class::{PromotionOutcome, SchoolClass};
pub use student::Student;
pub use types::{Gender, Position, FIRST_PARALLEL, GRADUATED_PARALLEL, LAST_PARALLEL};
