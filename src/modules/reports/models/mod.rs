pub mod dashboard_analytics;
pub mod financial_summary;
pub mod maintenance_cost;
pub mod review_statistics;

pub use dashboard_analytics::{DashboardAnalytics, VehicleRevenue};
pub use financial_summary::FinancialSummary;
pub use maintenance_cost::{CostByType, MaintenanceCostAnalysis, VehicleCost};
pub use review_statistics::{ReviewStatistics, SubRatingAverages, STAR_VALUES};
