// ==========================================
// 学校组织数据管理 - 导入记录定义
// ==========================================
// 职责: 表格行经字段映射后的类型化记录
// ==========================================

use crate::domain::employee::EmployeeRole;
use crate::domain::person::PersonName;
use crate::domain::school_class::SchoolClass;
use crate::domain::student::Student;
use crate::domain::types::Gender;
use serde::{Deserialize, Serialize};

/// 班级名单记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRecord {
    pub parallel: i32,
    pub vertical: String,
}

impl RosterRecord {
    pub fn class_key(&self) -> String {
        SchoolClass::key(self.parallel, &self.vertical)
    }

    pub fn into_class(self) -> SchoolClass {
        SchoolClass::new(self.parallel, self.vertical)
    }
}

/// 学生记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub birth_year: i32,
    pub gender: String,
    pub average_grade: f64,
    pub parallel: i32,
    pub vertical: String,
}

impl StudentRecord {
    pub fn class_key(&self) -> String {
        SchoolClass::key(self.parallel, &self.vertical)
    }

    pub fn into_student(self) -> Student {
        Student::new(
            PersonName::new(self.last_name, self.first_name, self.middle_name),
            self.birth_year,
            Gender::from_code(&self.gender),
            self.average_grade,
            self.parallel,
            self.vertical,
        )
    }
}

/// 教职工记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffRecord {
    pub name: PersonName,
    pub role: EmployeeRole,
}
