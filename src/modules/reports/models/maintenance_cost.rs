use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::metrics::{TimeRange, TrendPoint};

/// Fleet maintenance spend over a period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceCostAnalysis {
    /// Resolved reporting window
    pub period: TimeRange,
    /// Set when the analysis covers a single vehicle
    pub vehicle_id: Option<String>,
    pub log_count: u64,
    pub total_cost: Decimal,
    pub average_cost: Decimal,
    /// Spend per maintenance type seen in the period, largest first
    pub cost_by_type: Vec<CostByType>,
    /// Vehicles with the largest spend, largest first
    pub top_vehicles: Vec<VehicleCost>,
    /// Monthly spend, oldest first
    pub cost_trend: Vec<TrendPoint>,
    /// Kilometres driven between the first and last service of each vehicle
    pub total_distance: Decimal,
    /// Spend per kilometre driven, 0 when no distance was recorded
    pub cost_per_km: Decimal,
}

/// Spend on one maintenance type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostByType {
    pub maintenance_type: String,
    pub total_cost: Decimal,
    pub log_count: u64,
}

/// Spend on one vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleCost {
    pub vehicle_id: String,
    pub vehicle_name: Option<String>,
    pub total_cost: Decimal,
    pub log_count: u64,
}

impl MaintenanceCostAnalysis {
    pub fn is_empty(&self) -> bool {
        self.log_count == 0
    }
}
