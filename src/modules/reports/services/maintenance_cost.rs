use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::{round2, TOP_N};
use crate::modules::metrics::aggregators::{mean, ratio, sum, top_n, trend};
use crate::modules::metrics::{Granularity, TimeRange};
use crate::modules::records::MaintenanceLog;
use crate::modules::reports::models::{CostByType, MaintenanceCostAnalysis, VehicleCost};

/// Analyse maintenance spend over `period`
///
/// `vehicle_id` is echoed into the result when the logs were restricted to a
/// single vehicle.
pub fn assemble_maintenance_cost_analysis(
    period: TimeRange,
    vehicle_id: Option<String>,
    logs: &[MaintenanceLog],
) -> MaintenanceCostAnalysis {
    let total_cost = sum(logs, |l| l.cost);
    let total_distance = distance_driven(logs);

    let cost_by_type = top_n(logs, |l| l.maintenance_type.clone(), |l| l.cost, usize::MAX)
        .into_iter()
        .map(|group| CostByType {
            maintenance_type: group.key,
            total_cost: group.total,
            log_count: group.count,
        })
        .collect();

    let top_vehicles = top_n(logs, |l| l.vehicle_id.clone(), |l| l.cost, TOP_N)
        .into_iter()
        .map(|group| {
            let vehicle_name = logs
                .iter()
                .filter(|l| l.vehicle_id.as_deref() == Some(group.key.as_str()))
                .find_map(|l| l.vehicle_name.clone());
            VehicleCost {
                vehicle_id: group.key,
                vehicle_name,
                total_cost: group.total,
                log_count: group.count,
            }
        })
        .collect();

    MaintenanceCostAnalysis {
        period,
        vehicle_id,
        log_count: logs.len() as u64,
        total_cost,
        average_cost: round2(mean(logs, |l| l.cost)),
        cost_by_type,
        top_vehicles,
        cost_trend: trend(&period, Granularity::Month, logs, |l| l.service_date, |bucket| {
            sum(bucket.iter().copied(), |l| l.cost)
        }),
        total_distance,
        cost_per_km: round2(ratio(total_cost, total_distance)),
    }
}

/// Sum over vehicles of the spread between their lowest and highest odometer reading
fn distance_driven(logs: &[MaintenanceLog]) -> Decimal {
    let mut spans: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();

    for log in logs {
        let (Some(vehicle), Some(reading)) = (log.vehicle_id.as_deref(), log.odometer_reading) else {
            continue;
        };
        spans
            .entry(vehicle)
            .and_modify(|(low, high)| {
                *low = (*low).min(reading);
                *high = (*high).max(reading);
            })
            .or_insert((reading, reading));
    }

    spans
        .values()
        .map(|(low, high)| high.saturating_sub(*low))
        .fold(Decimal::ZERO, Decimal::saturating_add)
}
