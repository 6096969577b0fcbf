use rust_decimal::Decimal;

use super::{round2, TOP_N};
use crate::modules::metrics::aggregators::{count, latest, mean, rate, sum, top_n, trend};
use crate::modules::metrics::{Granularity, TimeRange};
use crate::modules::records::{Booking, Review};
use crate::modules::reports::models::{DashboardAnalytics, VehicleRevenue};

/// Build the vendor dashboard from the bookings and reviews of `period`
pub fn assemble_dashboard_analytics(
    period: TimeRange,
    bookings: &[Booking],
    reviews: &[Review],
) -> DashboardAnalytics {
    let top_vehicles = top_n(bookings, |b| b.vehicle_id.clone(), |b| b.total_amount, TOP_N)
        .into_iter()
        .map(|group| {
            let vehicle_name = first_vehicle_name(bookings, &group.key);
            VehicleRevenue {
                vehicle_id: group.key,
                vehicle_name,
                revenue: group.total,
                booking_count: group.count,
            }
        })
        .collect();

    let recent_bookings = latest(bookings, |b| b.created_at, TOP_N)
        .into_iter()
        .cloned()
        .collect();

    DashboardAnalytics {
        period,
        total_bookings: bookings.len() as u64,
        completed_bookings: count(bookings, Booking::is_completed),
        total_revenue: sum(bookings, |b| b.total_amount),
        average_rating: round2(mean(reviews, |r| r.rating)),
        occupancy_rate: round2(rate(bookings, Booking::is_completed)),
        top_vehicles,
        recent_bookings,
        revenue_trend: trend(&period, Granularity::Day, bookings, |b| b.created_at, |bucket| {
            sum(bucket.iter().copied(), |b| b.total_amount)
        }),
        booking_trend: trend(&period, Granularity::Day, bookings, |b| b.created_at, |bucket| {
            Decimal::from(bucket.len())
        }),
    }
}

fn first_vehicle_name(bookings: &[Booking], vehicle_id: &str) -> Option<String> {
    bookings
        .iter()
        .filter(|b| b.vehicle_id.as_deref() == Some(vehicle_id))
        .find_map(|b| b.vehicle_name.clone())
}
