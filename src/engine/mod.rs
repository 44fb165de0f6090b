// ==========================================
// 学校组织数据管理 - 引擎层
// ==========================================
// 职责: 装载、统计、图表序列、薪资计算
// 红线: 引擎不读写文件，只处理内存中的实体
// ==========================================

pub mod chart_series;
pub mod ingest;
pub mod payroll;
pub mod statistics;

// 重导出核心引擎
pub use chart_series::{ChartSeries, ChartSeriesBuilder, CountPoint, GradePoint, VerticalAverage};
pub use ingest::{IngestSummary, SchoolLoader};
pub use payroll::{PayrollEngine, PayrollSummary};
pub use statistics::{SchoolStatistics, StatisticsDetails, StatisticsEngine};
