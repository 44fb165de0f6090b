// ==========================================
// 学校组织数据管理 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 输出: 原始字符串行，再经 cell::coerce_rows 做类型转换
// ==========================================

use crate::importer::cell::{coerce_rows, TabularRow};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 从内存内容解析（上传内容等场景）
    pub fn parse_reader<R: Read>(&self, source: R) -> ImportResult<Vec<HashMap<String, String>>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(source);

        // 读取表头（去除 UTF-8 BOM）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 空行已由 csv 跳过；字段全空的行（如 ","）交给映射器报错
            records.push(row_map);
        }

        Ok(records)
    }
}

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>> {
        let path = file_path;

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = std::fs::File::open(path)?;
        self.parse_reader(file)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>> {
        let path = file_path;

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for data_row in rows {
            // 工作表中未填写任何单元格的行等同于空行
            if data_row.iter().all(|cell| matches!(cell, Data::Empty)) {
                continue;
            }

            let mut row_map = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }

            records.push(row_map);
        }

        Ok(records)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    /// 解析为原始字符串行
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<HashMap<String, String>>> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_records(path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_records(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }

    /// 解析并完成单元格类型转换
    pub fn parse_typed<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<TabularRow>> {
        let path = file_path.as_ref();
        let rows = coerce_rows(self.parse(path)?);
        tracing::debug!(path = %path.display(), rows = rows.len(), "表格文件解析完成");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::cell::CellValue;
    use rust_xlsxwriter::Workbook;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = csv_file(&["parallel,vertical", "8,A", "9,B"]);

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("parallel"), Some(&"8".to_string()));
        assert_eq!(records[1].get("vertical"), Some(&"B".to_string()));
    }

    #[test]
    fn test_csv_parser_trims_headers_and_values() {
        let records = CsvParser
            .parse_reader("\u{feff} parallel , vertical \n 8 , A \n".as_bytes())
            .unwrap();
        assert_eq!(records[0].get("parallel"), Some(&"8".to_string()));
        assert_eq!(records[0].get("vertical"), Some(&"A".to_string()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_records(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skips_only_empty_lines() {
        let temp_file = csv_file(&["parallel,vertical", "8,A", "", "9,B"]);
        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_csv_parser_keeps_rows_with_blank_fields() {
        let temp_file = csv_file(&["parallel,vertical", "8,A", ",", "9,B"]);
        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].get("parallel"), Some(&String::new()));
        assert_eq!(records[1].get("vertical"), Some(&String::new()));
    }

    #[test]
    fn test_excel_parser_first_sheet() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("classes.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, " parallel ").unwrap();
        sheet.write_string(0, 1, "vertical ").unwrap();
        sheet.write_number(1, 0, 8.0).unwrap();
        sheet.write_string(1, 1, " A ").unwrap();
        // 第 3 行留空
        sheet.write_number(3, 0, 9.0).unwrap();
        sheet.write_string(3, 1, "B").unwrap();
        workbook.save(&path).unwrap();

        let records = ExcelParser.parse_to_raw_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("parallel"), Some(&"8".to_string()));
        assert_eq!(records[0].get("vertical"), Some(&"A".to_string()));
        assert_eq!(records[1].get("vertical"), Some(&"B".to_string()));

        let rows = UniversalFileParser.parse_typed(&path).unwrap();
        assert_eq!(rows[1].get("parallel"), Some(&CellValue::Int(9)));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let result = UniversalFileParser.parse("classes.txt");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_universal_parser_typed_rows() {
        let temp_file = csv_file(&["parallel,vertical,average_grade", "8,A,9.5"]);
        let rows = UniversalFileParser.parse_typed(temp_file.path()).unwrap();
        assert_eq!(rows[0].get("parallel"), Some(&CellValue::Int(8)));
        assert_eq!(rows[0].get("average_grade"), Some(&CellValue::Float(9.5)));
    }
}
