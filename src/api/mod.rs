// ==========================================
// 学校组织数据管理 - API 层
// ==========================================
// 职责: 展示层调用入口（学校会话、薪资）
// 架构: API 层 → Engine 层 → Domain 层
// ==========================================

pub mod error;
pub mod payroll_api;
pub mod school_session;

pub use error::{ApiError, ApiResult};
pub use payroll_api::PayrollApi;
pub use school_session::{SchoolSession, StatisticsReport, StatisticsStage};
