// ==========================================
// 学校组织数据管理 - 学校聚合根
// ==========================================
// 职责: 持有 班级键 -> SchoolClass 映射（保持插入顺序，键唯一）
//       提供在读视图与整体升级
// 红线: 统计只读取在读班级 (1..=11)
// ==========================================

use crate::domain::school_class::{PromotionOutcome, SchoolClass};
use crate::domain::student::Student;
use serde::{Deserialize, Serialize};
use tracing::instrument;

// ==========================================
// PromotionReport - 整体升级结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromotionReport {
    /// (原班级名, 新班级名)
    pub promoted: Vec<(String, String)>,
    /// 本次升级毕业并移除的班级
    pub graduated: Vec<GraduatedClass>,
    /// 升级前已处于毕业状态、本次仅移除的班级名
    pub evicted: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraduatedClass {
    pub class_name: String,
    pub student_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct School {
    name: String,
    classes: Vec<SchoolClass>,
}

impl School {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 映射中的全部班级（含非在读），按插入顺序
    pub fn classes(&self) -> &[SchoolClass] {
        &self.classes
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn class(&self, key: &str) -> Option<&SchoolClass> {
        self.classes.iter().find(|c| c.class_name() == key)
    }

    pub fn contains_class(&self, key: &str) -> bool {
        self.class(key).is_some()
    }

    /// 清空所有班级
    pub fn clear_classes(&mut self) {
        self.classes.clear();
    }

    /// 插入班级；同键班级被覆盖（保留原位置），返回被覆盖的旧班级
    pub fn upsert_class(&mut self, class: SchoolClass) -> Option<SchoolClass> {
        let key = class.class_name();
        match self.classes.iter().position(|c| c.class_name() == key) {
            Some(idx) => Some(std::mem::replace(&mut self.classes[idx], class)),
            None => {
                self.classes.push(class);
                None
            }
        }
    }

    /// 将学生追加到指定班级
    ///
    /// # 返回
    /// - true: 已追加
    /// - false: 班级不存在，学生被丢弃
    pub fn enroll(&mut self, key: &str, student: Student) -> bool {
        match self.classes.iter_mut().find(|c| c.class_name() == key) {
            Some(class) => {
                class.add_student(student);
                true
            }
            None => false,
        }
    }

    // ==========================================
    // 派生视图
    // ==========================================

    /// 在读班级 (1 <= parallel <= 11)
    pub fn current_classes(&self) -> Vec<&SchoolClass> {
        self.classes.iter().filter(|c| c.is_current()).collect()
    }

    /// 在读班级的全部学生（先班级顺序，再插入顺序）
    pub fn all_students(&self) -> Vec<&Student> {
        self.classes
            .iter()
            .filter(|c| c.is_current())
            .flat_map(|c| c.students().iter())
            .collect()
    }

    pub fn total_student_count(&self) -> usize {
        self.classes
            .iter()
            .filter(|c| c.is_current())
            .map(SchoolClass::student_count)
            .sum()
    }

    // ==========================================
    // 整体升级
    // ==========================================

    /// 所有班级升一级，毕业班级连同学生一并移除
    #[instrument(skip(self), fields(school = %self.name, classes = self.classes.len()))]
    pub fn promote_all(&mut self) -> PromotionReport {
        let mut report = PromotionReport::default();
        let previous = std::mem::take(&mut self.classes);

        for mut class in previous {
            let old_name = class.class_name();
            match class.promote() {
                PromotionOutcome::Promoted { .. } => {
                    report.promoted.push((old_name, class.class_name()));
                    self.upsert_class(class);
                }
                PromotionOutcome::Graduated => {
                    report.graduated.push(GraduatedClass {
                        class_name: old_name,
                        student_count: class.student_count(),
                    });
                }
                PromotionOutcome::AlreadyGraduated => report.evicted.push(old_name),
            }
        }

        tracing::info!(
            promoted = report.promoted.len(),
            graduated = report.graduated.len(),
            evicted = report.evicted.len(),
            "整体升级完成"
        );
        report
    }
}
