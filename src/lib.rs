// ==========================================
// 学校组织数据管理 - 核心库
// ==========================================
// 职责: 班级/学生装载、统计、学年升级、教职工薪资计算与导出
// 技术栈: Rust + CSV/Excel 导入 + JSON 配置
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "uk");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 装载/统计/图表/薪资
pub mod engine;

// 导入层 - 外部数据与导出
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Gender, Position};

// 领域实体
pub use domain::{
    BaseSalaryTable, Employee, EmployeeRole, Person, PersonName, PromotionOutcome,
    PromotionReport, School, SchoolClass, SalaryCalculation, Student,
};

// 引擎
pub use engine::{ChartSeriesBuilder, PayrollEngine, SchoolLoader, StatisticsEngine};

// API
pub use api::{ApiError, PayrollApi, SchoolSession};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "school-registry";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
