use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::metrics::{TimeRange, TrendPoint};
use crate::modules::records::Booking;

/// Vendor home dashboard: booking volume, revenue and rating over a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardAnalytics {
    /// Resolved reporting window
    pub period: TimeRange,
    pub total_bookings: u64,
    pub completed_bookings: u64,
    /// Sum of booking amounts
    pub total_revenue: Decimal,
    /// Mean review rating, 0 when there are no rated reviews
    pub average_rating: Decimal,
    /// Share of bookings completed, as a percentage
    pub occupancy_rate: Decimal,
    /// Highest-earning vehicles, best first
    pub top_vehicles: Vec<VehicleRevenue>,
    /// Most recent bookings, newest first
    pub recent_bookings: Vec<Booking>,
    /// Daily revenue, oldest first
    pub revenue_trend: Vec<TrendPoint>,
    /// Daily booking count, oldest first
    pub booking_trend: Vec<TrendPoint>,
}

/// Revenue earned by one vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRevenue {
    pub vehicle_id: String,
    /// Name on the first booking seen for the vehicle
    pub vehicle_name: Option<String>,
    pub revenue: Decimal,
    pub booking_count: u64,
}

impl DashboardAnalytics {
    /// No bookings in the period
    pub fn is_empty(&self) -> bool {
        self.total_bookings == 0
    }
}
