pub mod dashboard_analytics;
pub mod financial_summary;
pub mod maintenance_cost;
pub mod report_service;
pub mod review_statistics;

pub use dashboard_analytics::assemble_dashboard_analytics;
pub use financial_summary::assemble_financial_summary;
pub use maintenance_cost::assemble_maintenance_cost_analysis;
pub use report_service::ReportService;
pub use review_statistics::assemble_review_statistics;

use rust_decimal::Decimal;

/// Length of every "top" list on a dashboard
pub const TOP_N: usize = 5;

/// Averages and rates are shown with two decimal places
pub(crate) fn round2(value: Decimal) -> Decimal {
    value.round_dp(2)
}
