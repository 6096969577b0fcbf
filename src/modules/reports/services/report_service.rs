use chrono::FixedOffset;
use futures_util::future::try_join;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::{
    assemble_dashboard_analytics, assemble_financial_summary, assemble_maintenance_cost_analysis,
    assemble_review_statistics,
};
use crate::core::{AppError, Clock, Result, SystemClock};
use crate::modules::metrics::{Granularity, ReportPeriod, TimeRange};
use crate::modules::records::{project, Booking, MaintenanceLog, Review, SourceRecord, Transaction};
use crate::modules::reports::models::{
    DashboardAnalytics, FinancialSummary, MaintenanceCostAnalysis, ReviewStatistics,
};
use crate::modules::reports::repositories::{RecordFilters, RecordSource};

/// Entry point for every vendor report
///
/// Each call resolves the requested period against the injected clock, fetches
/// the records it needs and assembles the result. Calls share no state, so one
/// service can serve concurrent requests.
pub struct ReportService {
    source: Arc<dyn RecordSource>,
    clock: Arc<dyn Clock>,
    timezone: FixedOffset,
}

impl ReportService {
    /// Create a new report service
    ///
    /// # Arguments
    /// * `source` - Where raw records are fetched from
    /// * `clock` - Reference instant for period resolution
    /// * `timezone` - Zone whose calendar defines `today`, `month` and `year`
    pub fn new(source: Arc<dyn RecordSource>, clock: Arc<dyn Clock>, timezone: FixedOffset) -> Self {
        Self {
            source,
            clock,
            timezone,
        }
    }

    /// Service reading wall-clock time
    pub fn with_system_clock(source: Arc<dyn RecordSource>, timezone: FixedOffset) -> Self {
        Self::new(source, Arc::new(SystemClock), timezone)
    }

    /// Booking, revenue and rating dashboard
    ///
    /// # Errors
    /// * `InvalidPeriod` - the period cannot be resolved
    /// * `SourceUnavailable` - bookings or reviews could not be fetched
    pub async fn dashboard_analytics(
        &self,
        owner_id: &str,
        period: &ReportPeriod,
    ) -> Result<DashboardAnalytics> {
        let range = self.resolve_period(owner_id, period)?;
        info!(owner_id, period = %range, "Generating dashboard analytics");

        let filters = RecordFilters::new();
        let (bookings, reviews): (Vec<Booking>, Vec<Review>) = try_join(
            self.fetch(owner_id, &range, &filters),
            self.fetch(owner_id, &range, &filters),
        )
        .await?;

        let report = assemble_dashboard_analytics(range, &bookings, &reviews);
        if report.is_empty() {
            warn!(owner_id, period = %range, "Empty dashboard generated");
        }
        Ok(report)
    }

    /// Revenue, earnings, withdrawals and pending payouts
    ///
    /// # Errors
    /// * `InvalidPeriod` - the period cannot be resolved
    /// * `SourceUnavailable` - transactions could not be fetched
    pub async fn financial_summary(
        &self,
        owner_id: &str,
        period: &ReportPeriod,
    ) -> Result<FinancialSummary> {
        let range = self.resolve_period(owner_id, period)?;
        info!(owner_id, period = %range, "Generating financial summary");

        let transactions: Vec<Transaction> =
            self.fetch(owner_id, &range, &RecordFilters::new()).await?;

        let granularity = period
            .token()
            .map(Granularity::for_period)
            .unwrap_or_else(|| Granularity::for_range(&range));
        let report = assemble_financial_summary(range, granularity, &transactions);
        if report.is_empty() {
            warn!(owner_id, period = %range, "Empty financial summary generated");
        }
        Ok(report)
    }

    /// Maintenance spend across the whole fleet
    ///
    /// # Errors
    /// * `InvalidPeriod` - the period cannot be resolved
    /// * `SourceUnavailable` - maintenance logs could not be fetched
    pub async fn maintenance_cost_analysis(
        &self,
        owner_id: &str,
        period: &ReportPeriod,
    ) -> Result<MaintenanceCostAnalysis> {
        self.maintenance(owner_id, period, None).await
    }

    /// Maintenance spend for a single vehicle
    ///
    /// # Errors
    /// * `Validation` - `vehicle_id` is blank
    /// * `InvalidPeriod` - the period cannot be resolved
    /// * `SourceUnavailable` - maintenance logs could not be fetched
    pub async fn vehicle_maintenance_cost_analysis(
        &self,
        owner_id: &str,
        vehicle_id: &str,
        period: &ReportPeriod,
    ) -> Result<MaintenanceCostAnalysis> {
        let vehicle_id = vehicle_id.trim();
        if vehicle_id.is_empty() {
            return Err(AppError::validation("vehicle_id cannot be empty"));
        }
        self.maintenance(owner_id, period, Some(vehicle_id)).await
    }

    /// Rating averages, distribution and response rate
    ///
    /// # Errors
    /// * `InvalidPeriod` - the period cannot be resolved
    /// * `SourceUnavailable` - reviews could not be fetched
    pub async fn review_statistics(
        &self,
        owner_id: &str,
        period: &ReportPeriod,
    ) -> Result<ReviewStatistics> {
        let range = self.resolve_period(owner_id, period)?;
        info!(owner_id, period = %range, "Generating review statistics");

        let reviews: Vec<Review> = self.fetch(owner_id, &range, &RecordFilters::new()).await?;

        let report = assemble_review_statistics(range, &reviews);
        if report.is_empty() {
            warn!(owner_id, period = %range, "Empty review statistics generated");
        }
        Ok(report)
    }

    async fn maintenance(
        &self,
        owner_id: &str,
        period: &ReportPeriod,
        vehicle_id: Option<&str>,
    ) -> Result<MaintenanceCostAnalysis> {
        let range = self.resolve_period(owner_id, period)?;
        info!(owner_id, vehicle_id, period = %range, "Generating maintenance cost analysis");

        let mut filters = RecordFilters::new();
        if let Some(vehicle_id) = vehicle_id {
            filters.insert("vehicle_id".to_string(), vehicle_id.to_string());
        }
        let logs: Vec<MaintenanceLog> = self.fetch(owner_id, &range, &filters).await?;

        let report =
            assemble_maintenance_cost_analysis(range, vehicle_id.map(str::to_string), &logs);
        if report.is_empty() {
            warn!(owner_id, vehicle_id, period = %range, "Empty maintenance cost analysis generated");
        }
        Ok(report)
    }

    fn resolve_period(&self, owner_id: &str, period: &ReportPeriod) -> Result<TimeRange> {
        if owner_id.trim().is_empty() {
            return Err(AppError::validation("owner_id cannot be empty"));
        }
        period.resolve(self.clock.now(), &self.timezone)
    }

    /// Fetch and project all records of `R`'s kind
    ///
    /// Every source failure surfaces as `SourceUnavailable`; nothing is
    /// assembled from a failed fetch.
    async fn fetch<R: SourceRecord>(
        &self,
        owner_id: &str,
        range: &TimeRange,
        filters: &RecordFilters,
    ) -> Result<Vec<R>> {
        let rows = self
            .source
            .fetch(owner_id, R::KIND, range, filters)
            .await
            .map_err(|e| {
                error!(owner_id, kind = %R::KIND, error = %e, "Failed to fetch records");
                match e {
                    AppError::SourceUnavailable(_) => e,
                    other => AppError::source_unavailable(other.to_string()),
                }
            })?;

        debug!(owner_id, kind = %R::KIND, rows = rows.len(), "Projecting records");
        Ok(project(&rows))
    }
}
