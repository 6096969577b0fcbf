use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{decimal_field, string_field, timestamp_field};
use super::{RecordKind, SourceRecord};

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::InProgress => write!(f, "in_progress"),
            BookingStatus::Completed => write!(f, "completed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "in_progress" | "active" => Ok(BookingStatus::InProgress),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

/// Vehicle booking made by a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Option<String>,
    pub vehicle_id: Option<String>,
    pub vehicle_name: Option<String>,
    pub customer_name: Option<String>,
    pub status: Option<BookingStatus>,
    /// Amount charged for the booking
    pub total_amount: Option<Decimal>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Booking {
    pub const FIELDS: &'static [&'static str] = &[
        "id",
        "vehicle_id",
        "vehicle_name",
        "customer_name",
        "status",
        "total_amount",
        "created_at",
    ];

    pub fn is_completed(&self) -> bool {
        self.status == Some(BookingStatus::Completed)
    }
}

impl SourceRecord for Booking {
    const KIND: RecordKind = RecordKind::Bookings;

    fn from_row(row: &Value) -> Self {
        Self {
            id: string_field(row, "id"),
            vehicle_id: string_field(row, "vehicle_id"),
            vehicle_name: string_field(row, "vehicle_name"),
            customer_name: string_field(row, "customer_name"),
            status: string_field(row, "status").and_then(|s| s.parse().ok()),
            total_amount: decimal_field(row, "total_amount"),
            created_at: timestamp_field(row, "created_at"),
        }
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
