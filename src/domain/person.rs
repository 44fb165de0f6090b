// ==========================================
// 学校组织数据管理 - 人员基础模型
// ==========================================
// 学生与教职工共享的姓名结构与 Person 能力
// ==========================================

use serde::{Deserialize, Serialize};

/// 姓名三元组（姓 / 名 / 父名）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
}

impl PersonName {
    pub fn new(
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        middle_name: impl Into<String>,
    ) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
            middle_name: middle_name.into(),
        }
    }

    /// 全名: "{姓} {名} {父名}"
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.last_name, self.first_name, self.middle_name)
    }
}

// ==========================================
// Trait: Person
// ==========================================
pub trait Person {
    fn name(&self) -> &PersonName;

    fn full_name(&self) -> String {
        self.name().full_name()
    }
}
