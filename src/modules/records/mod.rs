//! Typed views over the raw rows a record source returns.
//!
//! Rows arrive as loosely-typed JSON objects keyed by domain field names.
//! Each record type projects a row into a struct whose fields are all
//! optional, so one bad row degrades to missing values instead of failing a
//! whole report.

pub mod booking;
pub mod fields;
pub mod maintenance_log;
pub mod review;
pub mod transaction;

pub use booking::{Booking, BookingStatus};
pub use maintenance_log::MaintenanceLog;
pub use review::Review;
pub use transaction::{Transaction, TransactionStatus};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Kind of record a source can be asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Bookings,
    Transactions,
    MaintenanceLogs,
    Reviews,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Bookings => "bookings",
            RecordKind::Transactions => "transactions",
            RecordKind::MaintenanceLogs => "maintenance_logs",
            RecordKind::Reviews => "reviews",
        }
    }

    /// Field holding the instant a record is bucketed and range-filtered by
    pub fn timestamp_field(&self) -> &'static str {
        match self {
            RecordKind::MaintenanceLogs => "service_date",
            RecordKind::Bookings | RecordKind::Transactions | RecordKind::Reviews => "created_at",
        }
    }

    /// Fields a row of this kind carries
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            RecordKind::Bookings => Booking::FIELDS,
            RecordKind::Transactions => Transaction::FIELDS,
            RecordKind::MaintenanceLogs => MaintenanceLog::FIELDS,
            RecordKind::Reviews => Review::FIELDS,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed record projected from a source row
pub trait SourceRecord: Sized {
    const KIND: RecordKind;

    /// Project a raw row; never fails
    fn from_row(row: &Value) -> Self;

    /// Instant the record is bucketed by
    fn timestamp(&self) -> Option<DateTime<Utc>>;
}

/// Project every row of a fetched batch
pub fn project<R: SourceRecord>(rows: &[Value]) -> Vec<R> {
    rows.iter().map(R::from_row).collect()
}
