//! Vendor reports: record sources, the report service and its HTTP surface.

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{DashboardAnalytics, FinancialSummary, MaintenanceCostAnalysis, ReviewStatistics};
pub use repositories::{InMemoryRecordSource, MySqlRecordSource, RecordFilters, RecordSource};
pub use services::ReportService;
