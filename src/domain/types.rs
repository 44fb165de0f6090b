// ==========================================
// 学校组织数据管理 - 领域类型定义
// ==========================================
// 职责: 性别、岗位、年级边界常量
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 年级 (Parallel) 边界
// ==========================================
/// 最低在读年级
pub const FIRST_PARALLEL: i32 = 1;

/// 最高在读年级（毕业前一年）
pub const LAST_PARALLEL: i32 = 11;

/// 毕业标记年级
pub const GRADUATED_PARALLEL: i32 = 12;

/// 是否为在读年级 (1..=11)
pub fn is_current_parallel(parallel: i32) -> bool {
    (FIRST_PARALLEL..=LAST_PARALLEL).contains(&parallel)
}

// ==========================================
// 性别 (Gender)
// ==========================================
// 输入代码: "M" 男 / "F" 女，其他代码原样保留
// 统计口径: 非 "M" 一律计入女生比例
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other(String),
}

impl Gender {
    /// 从输入代码解析（区分大小写，"m"/"f" 不视为男/女）
    pub fn from_code(code: &str) -> Self {
        let trimmed = code.trim();
        match trimmed {
            "M" => Gender::Male,
            "F" => Gender::Female,
            _ => Gender::Other(trimmed.to_string()),
        }
    }

    pub fn is_male(&self) -> bool {
        matches!(self, Gender::Male)
    }

    /// 输出代码
    pub fn code(&self) -> &str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Other(code) => code,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ==========================================
// 岗位 (Position)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Director,
    Teacher,
    SecurityGuard,
}

impl Position {
    /// 从岗位代码解析（大小写不敏感，未知代码返回 None）
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "director" => Some(Position::Director),
            "teacher" => Some(Position::Teacher),
            "securityguard" | "security_guard" => Some(Position::SecurityGuard),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Position::Director => "Director",
            Position::Teacher => "Teacher",
            Position::SecurityGuard => "SecurityGuard",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_from_code() {
        assert_eq!(Gender::from_code("M"), Gender::Male);
        assert_eq!(Gender::from_code(" F "), Gender::Female);
        assert_eq!(Gender::from_code("m"), Gender::Other("m".to_string()));
        assert!(!Gender::from_code("m").is_male());
        assert_eq!(Gender::from_code("X"), Gender::Other("X".to_string()));
        assert!(!Gender::from_code("X").is_male());
    }

    #[test]
    fn test_position_codes() {
        assert_eq!(Position::from_code("director"), Some(Position::Director));
        assert_eq!(Position::from_code("SecurityGuard"), Some(Position::SecurityGuard));
        assert_eq!(Position::from_code("Janitor"), None);
        assert_eq!(Position::Teacher.to_string(), "Teacher");
    }

    #[test]
    fn test_current_parallel_bounds() {
        assert!(!is_current_parallel(0));
        assert!(is_current_parallel(1));
        assert!(is_current_parallel(11));
        assert!(!is_current_parallel(GRADUATED_PARALLEL));
    }
}
