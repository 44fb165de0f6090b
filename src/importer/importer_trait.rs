// ==========================================
// 学校组织数据管理 - 导入接口定义
// ==========================================
// 职责: 定义文件解析与字段映射接口（不包含实现）
// ==========================================

use crate::importer::cell::TabularRow;
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: CsvParser / ExcelParser
pub trait FileParser {
    /// 解析文件为原始行（表头 -> 去空白后的字符串），跳过全空行
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>>;
}

// ==========================================
// RecordMapper Trait
// ==========================================
// 实现者: RosterFieldMapper / StudentFieldMapper / StaffFieldMapper
pub trait RecordMapper {
    type Record;

    /// 将一行类型化数据映射为记录
    ///
    /// # 参数
    /// - row: 类型化行
    /// - row_number: 行号（从 1 开始，不含表头）
    fn map_row(&self, row: &TabularRow, row_number: usize) -> ImportResult<Self::Record>;

    /// 批量映射，遇到第一条错误即停止
    fn map_rows(&self, rows: &[TabularRow]) -> ImportResult<Vec<Self::Record>> {
        rows.iter()
            .enumerate()
            .map(|(idx, row)| self.map_row(row, idx + 1))
            .collect()
    }
}
