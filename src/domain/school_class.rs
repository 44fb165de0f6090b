// ==========================================
// 学校组织数据管理 - 班级领域模型
// ==========================================
// 职责: 持有学生集合，执行单个班级的升级状态转换
// 红线: 升级时班级与全部学生的 parallel 同步更新
// ==========================================

use crate::domain::student::Student;
use crate::domain::types::{is_current_parallel, GRADUATED_PARALLEL, LAST_PARALLEL};
use serde::{Deserialize, Serialize};

// ==========================================
// PromotionOutcome - 单个班级升级结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromotionOutcome {
    /// 升入下一年级
    Promoted { from: i32, to: i32 },
    /// 11 年级毕业（parallel 变为 12，需由 School 移除）
    Graduated,
    /// 已毕业班级再次升级：保持不变
    AlreadyGraduated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolClass {
    parallel: i32,
    vertical: String,
    students: Vec<Student>,
}

impl SchoolClass {
    pub fn new(parallel: i32, vertical: impl Into<String>) -> Self {
        Self {
            parallel,
            vertical: vertical.into(),
            students: Vec::new(),
        }
    }

    /// 班级键 "{parallel}-{vertical}"
    pub fn key(parallel: i32, vertical: &str) -> String {
        format!("{}-{}", parallel, vertical)
    }

    pub fn parallel(&self) -> i32 {
        self.parallel
    }

    pub fn vertical(&self) -> &str {
        &self.vertical
    }

    /// 班级名称，例如 "8-A"
    pub fn class_name(&self) -> String {
        Self::key(self.parallel, &self.vertical)
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// 是否为在读班级 (1..=11)
    pub fn is_current(&self) -> bool {
        is_current_parallel(self.parallel)
    }

    /// 追加学生（所有权转移）
    ///
    /// 学生的 parallel/vertical 会被同步为本班级的值
    pub fn add_student(&mut self, mut student: Student) {
        student.place(self.parallel, &self.vertical);
        self.students.push(student);
    }

    /// 升级到下一年级
    ///
    /// # 规则
    /// - parallel < 11: parallel + 1，同步到所有学生
    /// - parallel == 11: 变为 12（毕业）
    /// - parallel > 11: 不做任何修改
    pub fn promote(&mut self) -> PromotionOutcome {
        if self.parallel < LAST_PARALLEL {
            let from = self.parallel;
            self.parallel += 1;
            for student in &mut self.students {
                student.place(self.parallel, &self.vertical);
            }
            PromotionOutcome::Promoted {
                from,
                to: self.parallel,
            }
        } else if self.parallel == LAST_PARALLEL {
            self.parallel = GRADUATED_PARALLEL;
            for student in &mut self.students {
                student.place(self.parallel, &self.vertical);
            }
            PromotionOutcome::Graduated
        } else {
            tracing::warn!(
                class = %self.class_name(),
                "班级已毕业，忽略重复升级"
            );
            PromotionOutcome::AlreadyGraduated
        }
    }
}
