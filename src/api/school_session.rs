// ==========================================
// 学校组织数据管理 - 学校会话 API
// ==========================================
// 职责: 展示层入口，持有单个 School 实例及会话标志
// 生命周期: new → load_* → statistics / chart_series → promote_all → reset
// 红线: 每个会话独占一个 School，不在会话间共享
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::school::{PromotionReport, School};
use crate::engine::chart_series::{ChartSeries, ChartSeriesBuilder};
use crate::engine::ingest::{IngestSummary, SchoolLoader};
use crate::engine::statistics::{SchoolStatistics, StatisticsEngine};
use crate::i18n::{t, t_with_args};
use crate::importer::cell::TabularRow;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::records::{RosterRecord, StudentRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

// ==========================================
// StatisticsStage - 统计所处阶段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatisticsStage {
    /// 装载后、升级前
    Initial,
    /// 升级后
    Updated,
}

impl StatisticsStage {
    fn label(&self) -> String {
        match self {
            StatisticsStage::Initial => t("stats.stage_initial"),
            StatisticsStage::Updated => t("stats.stage_updated"),
        }
    }
}

/// 带阶段标记的统计结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub stage: StatisticsStage,
    pub statistics: SchoolStatistics,
}

impl StatisticsReport {
    /// 渲染为本地化文本行
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = vec![t_with_args(
            "stats.heading",
            &[("stage", &self.stage.label())],
        )];

        let details = match self.statistics.details() {
            Some(d) if self.statistics.is_valid => d,
            _ => {
                lines.push(t("stats.not_enough_data"));
                return lines;
            }
        };

        lines.push(t_with_args(
            "stats.total_students",
            &[("count", &self.statistics.total_students.to_string())],
        ));
        lines.push(t_with_args(
            "stats.avg_per_class",
            &[("value", &format!("{:.2}", details.avg_students_per_class))],
        ));
        lines.push(t_with_args(
            "stats.gender_split",
            &[
                ("male", &format!("{:.1}", details.male_percent)),
                ("female", &format!("{:.1}", details.female_percent)),
            ],
        ));
        lines.push(t_with_args(
            "stats.max_students",
            &[
                ("count", &details.max_students.to_string()),
                ("classes", &details.max_classes_label()),
            ],
        ));
        lines.push(t_with_args(
            "stats.min_students",
            &[
                ("count", &details.min_students.to_string()),
                ("classes", &details.min_classes_label()),
            ],
        ));
        lines
    }
}

// ==========================================
// SchoolSession - 学校会话
// ==========================================
pub struct SchoolSession {
    session_id: Uuid,
    school: School,
    loader: SchoolLoader,
    data_loaded: bool,
    promoted: bool,
    loaded_at: Option<DateTime<Utc>>,
    promoted_at: Option<DateTime<Utc>>,
}

impl SchoolSession {
    /// 创建新会话
    ///
    /// # 参数
    /// - school_name: 学校名称
    pub fn new(school_name: impl Into<String>) -> Self {
        let session = Self {
            session_id: Uuid::new_v4(),
            school: School::new(school_name),
            loader: SchoolLoader::new(),
            data_loaded: false,
            promoted: false,
            loaded_at: None,
            promoted_at: None,
        };
        tracing::debug!(session_id = %session.session_id, school = %session.school.name(), "创建学校会话");
        session
    }

    /// 重置会话（保留学校名称，清空数据与标志）
    pub fn reset(&mut self) {
        let name = self.school.name().to_string();
        *self = Self::new(name);
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn school(&self) -> &School {
        &self.school
    }

    pub fn data_loaded(&self) -> bool {
        self.data_loaded
    }

    pub fn promoted(&self) -> bool {
        self.promoted
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn promoted_at(&self) -> Option<DateTime<Utc>> {
        self.promoted_at
    }

    // ==========================================
    // 装载
    // ==========================================

    /// 从 classes / students 文件装载（CSV 或 Excel）
    pub fn load_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &mut self,
        classes_path: P,
        students_path: Q,
    ) -> ApiResult<IngestSummary> {
        let parser = UniversalFileParser;
        let parsed = parser
            .parse_typed(classes_path)
            .and_then(|roster| Ok((roster, parser.parse_typed(students_path)?)));

        match parsed {
            Ok((roster, students)) => self.load_rows(&roster, &students),
            Err(e) => {
                tracing::warn!(error = %e, "学校数据文件读取失败");
                self.data_loaded = false;
                Err(e.into())
            }
        }
    }

    /// 从类型化表格行装载
    pub fn load_rows(
        &mut self,
        roster_rows: &[TabularRow],
        student_rows: &[TabularRow],
    ) -> ApiResult<IngestSummary> {
        self.promoted = false;
        self.promoted_at = None;

        match self.loader.ingest_rows(&mut self.school, roster_rows, student_rows) {
            Ok(summary) => {
                self.mark_loaded();
                Ok(summary)
            }
            Err(e) => {
                self.data_loaded = false;
                Err(e.into())
            }
        }
    }

    /// 从已校验的记录装载
    pub fn load_records(
        &mut self,
        roster: Vec<RosterRecord>,
        students: Vec<StudentRecord>,
    ) -> IngestSummary {
        self.promoted = false;
        self.promoted_at = None;
        let summary = self.loader.ingest_records(&mut self.school, roster, students);
        self.mark_loaded();
        summary
    }

    fn mark_loaded(&mut self) {
        self.data_loaded = true;
        self.loaded_at = Some(Utc::now());
    }

    /// 装载结果的本地化提示
    pub fn load_message(summary: &IngestSummary) -> String {
        t_with_args(
            "load.success",
            &[
                ("classes", &summary.class_count.to_string()),
                ("students", &summary.student_count.to_string()),
            ],
        )
    }

    // ==========================================
    // 只读查询
    // ==========================================

    /// 当前统计（阶段由是否已升级决定）
    pub fn statistics(&self) -> ApiResult<StatisticsReport> {
        self.ensure_loaded()?;
        Ok(StatisticsReport {
            stage: if self.promoted {
                StatisticsStage::Updated
            } else {
                StatisticsStage::Initial
            },
            statistics: StatisticsEngine::compute(&self.school),
        })
    }

    /// 图表序列
    pub fn chart_series(&self) -> ApiResult<ChartSeries> {
        self.ensure_loaded()?;
        Ok(ChartSeriesBuilder::build(&self.school))
    }

    // ==========================================
    // 升级
    // ==========================================

    /// 全部班级升入下一学年（用户显式操作）
    pub fn promote_all(&mut self) -> ApiResult<PromotionReport> {
        self.ensure_loaded()?;
        tracing::info!(session_id = %self.session_id, "{}", t("promote.started"));

        let report = self.school.promote_all();
        for graduated in &report.graduated {
            tracing::info!(
                "{}",
                t_with_args(
                    "promote.graduated",
                    &[
                        ("class", &graduated.class_name),
                        ("count", &graduated.student_count.to_string()),
                    ],
                )
            );
        }

        self.promoted = true;
        self.promoted_at = Some(Utc::now());
        Ok(report)
    }

    fn ensure_loaded(&self) -> ApiResult<()> {
        if self.data_loaded {
            Ok(())
        } else {
            Err(ApiError::DataNotLoaded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<RosterRecord> {
        vec![
            RosterRecord { parallel: 10, vertical: "A".to_string() },
            RosterRecord { parallel: 11, vertical: "B".to_string() },
        ]
    }

    fn student(parallel: i32, vertical: &str, gender: &str) -> StudentRecord {
        StudentRecord {
            last_name: "Ткаченко".to_string(),
            first_name: "Ірина".to_string(),
            middle_name: "Василівна".to_string(),
            birth_year: 2008,
            gender: gender.to_string(),
            average_grade: 10.5,
            parallel,
            vertical: vertical.to_string(),
        }
    }

    #[test]
    fn test_queries_require_loaded_data() {
        let mut session = SchoolSession::new("Школа №2");
        assert!(matches!(session.statistics(), Err(ApiError::DataNotLoaded)));
        assert!(matches!(session.promote_all(), Err(ApiError::DataNotLoaded)));
    }

    #[test]
    fn test_stage_switches_after_promotion() {
        let mut session = SchoolSession::new("Школа №2");
        session.load_records(roster(), vec![student(10, "A", "M"), student(11, "B", "F")]);

        assert_eq!(session.statistics().unwrap().stage, StatisticsStage::Initial);

        let report = session.promote_all().unwrap();
        assert_eq!(report.graduated.len(), 1);
        assert!(session.promoted());

        let stats = session.statistics().unwrap();
        assert_eq!(stats.stage, StatisticsStage::Updated);
        assert_eq!(stats.statistics.total_students, 1);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut session = SchoolSession::new("Школа №2");
        let first_id = session.session_id();
        session.load_records(roster(), vec![student(10, "A", "M")]);

        session.reset();

        assert!(!session.data_loaded());
        assert_eq!(session.school().class_count(), 0);
        assert_eq!(session.school().name(), "Школа №2");
        assert_ne!(session.session_id(), first_id);
    }

    #[test]
    fn test_failed_load_clears_loaded_flag() {
        let mut session = SchoolSession::new("Школа №2");
        session.load_records(roster(), vec![]);
        assert!(session.data_loaded());

        let mut bad = TabularRow::new();
        bad.insert(
            "parallel".to_string(),
            crate::importer::cell::CellValue::Text("x".to_string()),
        );
        let err = session.load_rows(&[bad], &[]).unwrap_err();

        assert_eq!(err.code(), "ROSTER_FORMAT_ERROR");
        assert!(!session.data_loaded());
    }
}
