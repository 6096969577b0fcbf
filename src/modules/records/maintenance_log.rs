use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{decimal_field, string_field, timestamp_field};
use super::{RecordKind, SourceRecord};

/// Service performed on a fleet vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceLog {
    pub id: Option<String>,
    pub vehicle_id: Option<String>,
    pub vehicle_name: Option<String>,
    /// e.g. "oil_change", "tire_rotation", "repair"
    pub maintenance_type: Option<String>,
    pub cost: Option<Decimal>,
    /// Odometer at service time, in km
    pub odometer_reading: Option<Decimal>,
    pub service_date: Option<DateTime<Utc>>,
}

impl MaintenanceLog {
    pub const FIELDS: &'static [&'static str] = &[
        "id",
        "vehicle_id",
        "vehicle_name",
        "maintenance_type",
        "cost",
        "odometer_reading",
        "service_date",
    ];
}

impl SourceRecord for MaintenanceLog {
    const KIND: RecordKind = RecordKind::MaintenanceLogs;

    fn from_row(row: &Value) -> Self {
        Self {
            id: string_field(row, "id"),
            vehicle_id: string_field(row, "vehicle_id"),
            vehicle_name: string_field(row, "vehicle_name"),
            maintenance_type: string_field(row, "maintenance_type"),
            cost: decimal_field(row, "cost"),
            odometer_reading: decimal_field(row, "odometer_reading"),
            service_date: timestamp_field(row, "service_date"),
        }
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.service_date
    }
}
