// ==========================================
// 学校组织数据管理 - 图表数据序列
// ==========================================
// 职责: 为图表层准备已聚合的数值序列（不负责绘制）
// 口径: 只使用在读班级及其学生
// 序列:
//   - 各年级学生数（按年级升序）
//   - 各字母分班的平均班级人数（按字母升序）
//   - 各出生年份学生数（按年份升序）
//   - 年级 vs 平均成绩 散点
// ==========================================

use crate::domain::school::School;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountPoint {
    pub key: i32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerticalAverage {
    pub vertical: String,
    pub avg_students: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradePoint {
    pub parallel: i32,
    pub average_grade: f64,
}

/// 全部图表序列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub students_per_parallel: Vec<CountPoint>,
    pub avg_students_per_vertical: Vec<VerticalAverage>,
    pub students_per_birth_year: Vec<CountPoint>,
    pub grade_vs_parallel: Vec<GradePoint>,
}

pub struct ChartSeriesBuilder;

impl ChartSeriesBuilder {
    pub fn build(school: &School) -> ChartSeries {
        ChartSeries {
            students_per_parallel: Self::students_per_parallel(school),
            avg_students_per_vertical: Self::avg_students_per_vertical(school),
            students_per_birth_year: Self::students_per_birth_year(school),
            grade_vs_parallel: Self::grade_vs_parallel(school),
        }
    }

    pub fn students_per_parallel(school: &School) -> Vec<CountPoint> {
        count_by(school.all_students().iter().map(|s| s.parallel()))
    }

    pub fn students_per_birth_year(school: &School) -> Vec<CountPoint> {
        count_by(school.all_students().iter().map(|s| s.birth_year()))
    }

    /// 每个字母分班: 学生总数 / 班级数
    pub fn avg_students_per_vertical(school: &School) -> Vec<VerticalAverage> {
        let mut totals: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for class in school.current_classes() {
            let entry = totals.entry(class.vertical()).or_insert((0, 0));
            entry.0 += class.student_count();
            entry.1 += 1;
        }

        totals
            .into_iter()
            .map(|(vertical, (students, classes))| VerticalAverage {
                vertical: vertical.to_string(),
                avg_students: students as f64 / classes as f64,
            })
            .collect()
    }

    pub fn grade_vs_parallel(school: &School) -> Vec<GradePoint> {
        school
            .all_students()
            .iter()
            .map(|s| GradePoint {
                parallel: s.parallel(),
                average_grade: s.average_grade(),
            })
            .collect()
    }
}

fn count_by(keys: impl Iterator<Item = i32>) -> Vec<CountPoint> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(key, count)| CountPoint { key, count })
        .collect()
}
