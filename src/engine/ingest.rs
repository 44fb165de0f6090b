// ==========================================
// 学校组织数据管理 - 数据装载引擎
// ==========================================
// 职责: 班级名单 + 学生记录 → School 实体图
// 流程:
//   1. 丢弃原有班级，按名单重建（同键后者覆盖前者）
//   2. 逐条学生记录按班级键归入；班级不存在 → 静默跳过
// 失败语义:
//   - 名单阶段失败: 不应用任何名单，不尝试学生装载
//   - 学生阶段失败: 已装载的学生保留（不回滚）
// ==========================================

use crate::domain::school::School;
use crate::importer::cell::TabularRow;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::{RosterFieldMapper, StudentFieldMapper};
use crate::importer::importer_trait::RecordMapper;
use crate::importer::records::{RosterRecord, StudentRecord};
use serde::{Deserialize, Serialize};
use tracing::instrument;

// ==========================================
// IngestSummary - 装载结果
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    /// 映射中的班级数
    pub class_count: usize,
    /// 在读学生总数
    pub student_count: usize,
    /// 因班级不存在而跳过的学生数
    pub skipped_students: usize,
}

// ==========================================
// SchoolLoader - 数据装载引擎
// ==========================================
pub struct SchoolLoader {
    roster_mapper: RosterFieldMapper,
    student_mapper: StudentFieldMapper,
}

impl Default for SchoolLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SchoolLoader {
    pub fn new() -> Self {
        Self {
            roster_mapper: RosterFieldMapper,
            student_mapper: StudentFieldMapper,
        }
    }

    /// 从类型化表格行装载（主入口）
    ///
    /// # 参数
    /// - school: 目标学校（原有班级将被丢弃）
    /// - roster_rows: 班级名单行（parallel, vertical）
    /// - student_rows: 学生行（完整字段）
    ///
    /// # 返回
    /// - Ok(IngestSummary): 班级数 / 在读学生数 / 跳过数
    /// - Err(ImportError): 记录格式错误（携带行号与字段）
    #[instrument(skip_all, fields(
        school = %school.name(),
        roster_rows = roster_rows.len(),
        student_rows = student_rows.len()
    ))]
    pub fn ingest_rows(
        &self,
        school: &mut School,
        roster_rows: &[TabularRow],
        student_rows: &[TabularRow],
    ) -> ImportResult<IngestSummary> {
        school.clear_classes();

        // ===== 阶段 1: 班级名单（整体映射成功后才应用）=====
        let roster = self.roster_mapper.map_rows(roster_rows).map_err(|e| {
            tracing::warn!(error = %e, "班级名单格式错误，终止装载");
            e
        })?;
        self.install_roster(school, roster);

        // ===== 阶段 2: 学生（逐条应用）=====
        let mut skipped = 0;
        for (idx, row) in student_rows.iter().enumerate() {
            let record = self.student_mapper.map_row(row, idx + 1).map_err(|e| {
                tracing::warn!(
                    error = %e,
                    loaded = school.total_student_count(),
                    "学生记录格式错误，已装载部分保留"
                );
                e
            })?;
            if !Self::place_student(school, record) {
                skipped += 1;
            }
        }

        Ok(Self::summarize(school, skipped))
    }

    /// 从类型化记录装载（记录已校验，不会失败）
    #[instrument(skip_all, fields(school = %school.name(), roster = roster.len(), students = students.len()))]
    pub fn ingest_records(
        &self,
        school: &mut School,
        roster: Vec<RosterRecord>,
        students: Vec<StudentRecord>,
    ) -> IngestSummary {
        school.clear_classes();
        self.install_roster(school, roster);

        let mut skipped = 0;
        for record in students {
            if !Self::place_student(school, record) {
                skipped += 1;
            }
        }

        Self::summarize(school, skipped)
    }

    fn install_roster(&self, school: &mut School, roster: Vec<RosterRecord>) {
        for record in roster {
            if let Some(replaced) = school.upsert_class(record.into_class()) {
                tracing::warn!(
                    class = %replaced.class_name(),
                    "班级名单重复，覆盖先前班级"
                );
            }
        }
    }

    fn place_student(school: &mut School, record: StudentRecord) -> bool {
        let key = record.class_key();
        let placed = school.enroll(&key, record.into_student());
        if !placed {
            tracing::debug!(class = %key, "班级不存在，跳过学生");
        }
        placed
    }

    fn summarize(school: &School, skipped_students: usize) -> IngestSummary {
        let summary = IngestSummary {
            class_count: school.class_count(),
            student_count: school.total_student_count(),
            skipped_students,
        };
        tracing::info!(
            classes = summary.class_count,
            students = summary.student_count,
            skipped = summary.skipped_students,
            "学校数据装载完成"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::cell::CellValue;
    use crate::importer::error::{ImportError, RecordKind};
    use crate::domain::school_class::SchoolClass;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn roster_row(parallel: CellValue, vertical: &str) -> TabularRow {
        let mut row = TabularRow::new();
        row.insert("parallel".to_string(), parallel);
        row.insert("vertical".to_string(), text(vertical));
        row
    }

    fn student_row(parallel: i64, vertical: &str, gender: &str) -> TabularRow {
        let mut row = roster_row(CellValue::Int(parallel), vertical);
        row.insert("last_name".to_string(), text("Мельник"));
        row.insert("first_name".to_string(), text("Софія"));
        row.insert("middle_name".to_string(), text("Андріївна"));
        row.insert("birth_year".to_string(), CellValue::Int(2010));
        row.insert("gender".to_string(), text(gender));
        row.insert("average_grade".to_string(), CellValue::Float(8.5));
        row
    }

    #[test]
    fn test_ingest_rows_counts_matched_students() {
        let mut school = School::new("Школа №2");
        let roster = vec![
            roster_row(CellValue::Int(8), "A"),
            roster_row(CellValue::Int(9), "B"),
        ];
        let students = vec![
            student_row(8, "A", "M"),
            student_row(9, "B", "F"),
            student_row(7, "C", "F"),
        ];

        let summary = SchoolLoader::new()
            .ingest_rows(&mut school, &roster, &students)
            .unwrap();

        assert_eq!(
            summary,
            IngestSummary {
                class_count: 2,
                student_count: 2,
                skipped_students: 1
            }
        );
    }

    #[test]
    fn test_ingest_discards_previous_state() {
        let mut school = School::new("Школа №2");
        school.upsert_class(SchoolClass::new(5, "Z"));

        let roster = vec![roster_row(CellValue::Int(8), "A")];
        SchoolLoader::new().ingest_rows(&mut school, &roster, &[]).unwrap();

        assert!(!school.contains_class("5-Z"));
        assert!(school.contains_class("8-A"));
    }

    #[test]
    fn test_roster_failure_applies_nothing() {
        let mut school = School::new("Школа №2");
        let roster = vec![
            roster_row(CellValue::Int(8), "A"),
            roster_row(text("x"), "B"),
        ];
        let students = vec![student_row(8, "A", "M")];

        let err = SchoolLoader::new()
            .ingest_rows(&mut school, &roster, &students)
            .unwrap_err();

        assert_eq!(err.record_kind(), Some(RecordKind::Roster));
        assert_eq!(school.class_count(), 0);
        assert_eq!(school.total_student_count(), 0);
    }

    #[test]
    fn test_student_failure_keeps_already_loaded() {
        let mut school = School::new("Школа №2");
        let roster = vec![roster_row(CellValue::Int(8), "A")];
        let mut broken = student_row(8, "A", "F");
        broken.insert("average_grade".to_string(), text("добре"));
        let students = vec![student_row(8, "A", "M"), broken, student_row(8, "A", "F")];

        let err = SchoolLoader::new()
            .ingest_rows(&mut school, &roster, &students)
            .unwrap_err();

        assert!(matches!(err, ImportError::TypeConversionError { row: 2, .. }));
        assert_eq!(school.total_student_count(), 1);
    }

    #[test]
    fn test_duplicate_roster_row_overwrites_class() {
        let mut school = School::new("Школа №2");
        let roster = vec![
            RosterRecord { parallel: 8, vertical: "A".to_string() },
            RosterRecord { parallel: 8, vertical: "A".to_string() },
        ];

        let summary = SchoolLoader::new().ingest_records(&mut school, roster, Vec::new());
        assert_eq!(summary.class_count, 1);
    }

    #[test]
    fn test_float_parallel_is_truncated() {
        let mut school = School::new("Школа №2");
        let roster = vec![roster_row(CellValue::Float(8.0), "A")];
        SchoolLoader::new().ingest_rows(&mut school, &roster, &[]).unwrap();
        assert!(school.contains_class("8-A"));
    }
}
