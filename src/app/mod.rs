// ==========================================
// 学校组织数据管理 - 应用层
// ==========================================
// 职责: 组装配置、学校会话与薪资 API，供命令行入口使用
// ==========================================

pub mod state;

// 重导出
pub use state::{default_export_path, AppState};
