// ==========================================
// 学校组织数据管理 - 学生领域模型
// ==========================================
// 红线: parallel/vertical 必须与所属班级保持一致
//       (由 SchoolClass 维护，不允许外部直接修改)
// ==========================================

use crate::domain::person::{Person, PersonName};
use crate::domain::types::Gender;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    name: PersonName,
    birth_year: i32,
    gender: Gender,
    average_grade: f64,

    // ===== 班级归属（由 SchoolClass 同步）=====
    parallel: i32,
    vertical: String,
}

impl Student {
    pub fn new(
        name: PersonName,
        birth_year: i32,
        gender: Gender,
        average_grade: f64,
        parallel: i32,
        vertical: impl Into<String>,
    ) -> Self {
        Self {
            name,
            birth_year,
            gender,
            average_grade,
            parallel,
            vertical: vertical.into(),
        }
    }

    pub fn birth_year(&self) -> i32 {
        self.birth_year
    }

    pub fn gender(&self) -> &Gender {
        &self.gender
    }

    pub fn average_grade(&self) -> f64 {
        self.average_grade
    }

    pub fn parallel(&self) -> i32 {
        self.parallel
    }

    pub fn vertical(&self) -> &str {
        &self.vertical
    }

    /// 所在班级名称，例如 "8-A"
    pub fn class_name(&self) -> String {
        format!("{}-{}", self.parallel, self.vertical)
    }

    pub(crate) fn place(&mut self, parallel: i32, vertical: &str) {
        self.parallel = parallel;
        if self.vertical != vertical {
            self.vertical = vertical.to_string();
        }
    }
}

impl Person for Student {
    fn name(&self) -> &PersonName {
        &self.name
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {:.2}",
            self.full_name(),
            self.class_name(),
            self.average_grade
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Student {
        Student::new(
            PersonName::new("Петренко", "Олена", "Іванівна"),
            2010,
            Gender::Female,
            9.456,
            8,
            "A",
        )
    }

    #[test]
    fn test_display_info() {
        assert_eq!(sample().to_string(), "Петренко Олена Іванівна, 8-A, 9.46");
    }
}
