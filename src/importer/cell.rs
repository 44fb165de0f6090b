// ==========================================
// 学校组织数据管理 - 单元格类型转换
// ==========================================
// 规则: 去除首尾空白后，由数字和至多一个 '.' 组成的值转为数值
//       （含 '.' 为浮点，否则为整数），其余保持为文本
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 已完成类型转换的单元格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Text(String),
}

/// 一行表格数据（表头 -> 单元格）
pub type TabularRow = HashMap<String, CellValue>;

impl CellValue {
    /// 对原始字符串做类型转换
    pub fn coerce(raw: &str) -> Self {
        let value = raw.trim();
        let dots = value.matches('.').count();
        let digits_only = value.chars().filter(|c| *c != '.').all(|c| c.is_ascii_digit());
        let has_digit = value.chars().any(|c| c.is_ascii_digit());

        if has_digit && digits_only && dots <= 1 {
            if dots == 1 {
                if let Ok(v) = value.parse::<f64>() {
                    return CellValue::Float(v);
                }
            } else if let Ok(v) = value.parse::<i64>() {
                return CellValue::Int(v);
            }
        }
        CellValue::Text(value.to_string())
    }

    /// 整数读取: 整数原样；浮点向零截断；文本尝试解析
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(v) => Some(*v),
            CellValue::Float(v) if v.is_finite() => {
                let truncated = v.trunc();
                if truncated >= i64::MIN as f64 && truncated <= i64::MAX as f64 {
                    Some(truncated as i64)
                } else {
                    None
                }
            }
            CellValue::Float(_) => None,
            CellValue::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }

    /// 浮点读取: 任意数值或数值文本
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// 文本读取: 数值按文本输出
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{:?}", v),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// 将原始字符串行转换为类型化行（表头同时去除空白）
pub fn coerce_row(raw: HashMap<String, String>) -> TabularRow {
    raw.into_iter()
        .map(|(key, value)| (key.trim().to_string(), CellValue::coerce(&value)))
        .collect()
}

pub fn coerce_rows(raw: Vec<HashMap<String, String>>) -> Vec<TabularRow> {
    raw.into_iter().map(coerce_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(CellValue::coerce(" 8 "), CellValue::Int(8));
        assert_eq!(CellValue::coerce("9.5"), CellValue::Float(9.5));
        assert_eq!(CellValue::coerce("A"), CellValue::Text("A".to_string()));
    }

    #[test]
    fn test_coerce_keeps_non_plain_numbers_as_text() {
        assert_eq!(CellValue::coerce("-3"), CellValue::Text("-3".to_string()));
        assert_eq!(CellValue::coerce("1.2.3"), CellValue::Text("1.2.3".to_string()));
        assert_eq!(CellValue::coerce(""), CellValue::Text(String::new()));
        assert_eq!(CellValue::coerce("."), CellValue::Text(".".to_string()));
    }

    #[test]
    fn test_readers() {
        assert_eq!(CellValue::Float(8.7).as_i64(), Some(8));
        assert_eq!(CellValue::Text("-3".to_string()).as_i64(), Some(-3));
        assert_eq!(CellValue::Text("abc".to_string()).as_i64(), None);
        assert_eq!(CellValue::Int(9).as_f64(), Some(9.0));
        assert_eq!(CellValue::Int(5).as_text(), "5");
        assert_eq!(CellValue::Float(8.0).as_text(), "8.0");
    }

    #[test]
    fn test_coerce_row_trims_headers() {
        let mut raw = HashMap::new();
        raw.insert(" parallel ".to_string(), "7".to_string());
        let row = coerce_row(raw);
        assert_eq!(row.get("parallel"), Some(&CellValue::Int(7)));
    }
}
