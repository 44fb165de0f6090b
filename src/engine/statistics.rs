// ==========================================
// 学校组织数据管理 - 学校统计引擎
// ==========================================
// 口径: 只统计在读班级 (1..=11)
// 无在读班级或无学生 → is_valid = false，仅 total_students 有意义
// ==========================================

use crate::domain::school::School;
use crate::domain::school_class::SchoolClass;
use serde::{Deserialize, Serialize};
use tracing::instrument;

// ==========================================
// SchoolStatistics - 统计结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolStatistics {
    /// 调用方必须先检查该标志
    pub is_valid: bool,
    pub total_students: usize,
    pub details: Option<StatisticsDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsDetails {
    pub male_percent: f64,
    pub female_percent: f64,
    pub avg_students_per_class: f64,
    pub max_students: usize,
    /// 达到最大人数的班级（按在读班级顺序）
    pub max_classes: Vec<String>,
    pub min_students: usize,
    pub min_classes: Vec<String>,
}

impl StatisticsDetails {
    /// 例如 "8-A, 9-B"
    pub fn max_classes_label(&self) -> String {
        self.max_classes.join(", ")
    }

    pub fn min_classes_label(&self) -> String {
        self.min_classes.join(", ")
    }
}

impl SchoolStatistics {
    fn invalid(total_students: usize) -> Self {
        Self {
            is_valid: false,
            total_students,
            details: None,
        }
    }

    pub fn details(&self) -> Option<&StatisticsDetails> {
        self.details.as_ref()
    }
}

// ==========================================
// StatisticsEngine
// ==========================================
pub struct StatisticsEngine;

impl StatisticsEngine {
    #[instrument(skip_all, fields(school = %school.name()))]
    pub fn compute(school: &School) -> SchoolStatistics {
        let current_classes = school.current_classes();
        let students = school.all_students();
        let total = students.len();

        if total == 0 || current_classes.is_empty() {
            tracing::debug!(total, classes = current_classes.len(), "无可用统计数据");
            return SchoolStatistics::invalid(total);
        }

        let male = students.iter().filter(|s| s.gender().is_male()).count();
        let class_sizes: Vec<usize> = current_classes
            .iter()
            .map(|c| c.student_count())
            .collect();

        let max_students = class_sizes.iter().copied().max().unwrap_or(0);
        let min_students = class_sizes.iter().copied().min().unwrap_or(0);

        let details = StatisticsDetails {
            male_percent: male as f64 / total as f64 * 100.0,
            female_percent: (total - male) as f64 / total as f64 * 100.0,
            avg_students_per_class: class_sizes.iter().sum::<usize>() as f64
                / class_sizes.len() as f64,
            max_students,
            max_classes: names_with_size(&current_classes, max_students),
            min_students,
            min_classes: names_with_size(&current_classes, min_students),
        };

        SchoolStatistics {
            is_valid: true,
            total_students: total,
            details: Some(details),
        }
    }
}

fn names_with_size(classes: &[&SchoolClass], size: usize) -> Vec<String> {
    classes
        .iter()
        .filter(|c| c.student_count() == size)
        .map(|c| c.class_name())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::person::PersonName;
    use crate::domain::student::Student;
    use crate::domain::types::Gender;

    fn enroll(school: &mut School, parallel: i32, vertical: &str, genders: &[Gender]) {
        school.upsert_class(SchoolClass::new(parallel, vertical));
        let key = SchoolClass::key(parallel, vertical);
        for gender in genders {
            school.enroll(
                &key,
                Student::new(
                    PersonName::new("Кравець", "Марія", "Олексіївна"),
                    2010,
                    gender.clone(),
                    9.0,
                    parallel,
                    vertical,
                ),
            );
        }
    }

    #[test]
    fn test_empty_school_is_invalid() {
        let stats = StatisticsEngine::compute(&School::new("Школа №2"));
        assert!(!stats.is_valid);
        assert_eq!(stats.total_students, 0);
        assert!(stats.details().is_none());
    }

    #[test]
    fn test_classes_without_students_are_invalid() {
        let mut school = School::new("Школа №2");
        enroll(&mut school, 8, "A", &[]);
        assert!(!StatisticsEngine::compute(&school).is_valid);
    }

    #[test]
    fn test_single_class_scenario() {
        let mut school = School::new("Школа №2");
        enroll(&mut school, 8, "A", &[Gender::Male, Gender::Female]);

        let stats = StatisticsEngine::compute(&school);
        let details = stats.details().unwrap();

        assert!(stats.is_valid);
        assert_eq!(stats.total_students, 2);
        assert_eq!(details.male_percent, 50.0);
        assert_eq!(details.female_percent, 50.0);
        assert_eq!(details.max_students, 2);
        assert_eq!(details.min_students, 2);
        assert_eq!(details.max_classes_label(), "8-A");
    }

    #[test]
    fn test_ties_and_average() {
        let mut school = School::new("Школа №2");
        enroll(&mut school, 9, "B", &vec![Gender::Male; 3]);
        enroll(&mut school, 5, "A", &[Gender::Female]);
        enroll(&mut school, 7, "C", &[Gender::Male, Gender::Female, Gender::Female]);
        enroll(&mut school, 12, "D", &vec![Gender::Male; 10]);

        let stats = StatisticsEngine::compute(&school);
        let details = stats.details().unwrap();

        assert_eq!(stats.total_students, 7);
        assert!((details.avg_students_per_class - 7.0 / 3.0).abs() < 1e-9);
        assert_eq!(details.max_classes_label(), "9-B, 7-C");
        assert_eq!(details.min_classes, vec!["5-A".to_string()]);
    }

    #[test]
    fn test_gender_percentages_sum_to_hundred() {
        let mut school = School::new("Школа №2");
        enroll(
            &mut school,
            3,
            "A",
            &[
                Gender::Male,
                Gender::Female,
                Gender::Other("X".to_string()),
            ],
        );
        let details = StatisticsEngine::compute(&school).details.unwrap();
        assert!((details.male_percent + details.female_percent - 100.0).abs() < 1e-9);
        assert!((details.female_percent - 200.0 / 3.0).abs() < 1e-9);
    }
}
