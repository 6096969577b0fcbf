use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{decimal_field, string_field, timestamp_field};
use super::{RecordKind, SourceRecord};

/// Vendor ledger transaction status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Awaiting processing
    Pending,
    /// Funds in flight
    Processing,
    /// Settled
    Completed,
    Failed,
    Cancelled,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Processing => write!(f, "processing"),
            TransactionStatus::Completed => write!(f, "completed"),
            TransactionStatus::Failed => write!(f, "failed"),
            TransactionStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TransactionStatus::Pending),
            "processing" => Ok(TransactionStatus::Processing),
            "completed" => Ok(TransactionStatus::Completed),
            "failed" => Ok(TransactionStatus::Failed),
            "cancelled" | "canceled" => Ok(TransactionStatus::Cancelled),
            _ => Err(format!("Invalid transaction status: {}", s)),
        }
    }
}

/// Money movement on a vendor's account
///
/// Positive amounts are income (booking payments), negative amounts are
/// outflows (withdrawals, refunds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Option<String>,
    pub amount: Option<Decimal>,
    pub status: Option<TransactionStatus>,
    pub transaction_type: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub const FIELDS: &'static [&'static str] = &[
        "id",
        "amount",
        "status",
        "type",
        "description",
        "created_at",
    ];

    /// Amount if it is income
    pub fn income(&self) -> Option<Decimal> {
        self.amount.filter(|a| a.is_sign_positive() && !a.is_zero())
    }

    /// Absolute amount if it is an outflow
    pub fn outflow(&self) -> Option<Decimal> {
        self.amount.filter(|a| a.is_sign_negative() && !a.is_zero()).map(|a| a.abs())
    }

    pub fn has_status(&self, status: TransactionStatus) -> bool {
        self.status == Some(status)
    }
}

impl SourceRecord for Transaction {
    const KIND: RecordKind = RecordKind::Transactions;

    fn from_row(row: &Value) -> Self {
        Self {
            id: string_field(row, "id"),
            amount: decimal_field(row, "amount"),
            status: string_field(row, "status").and_then(|s| s.parse().ok()),
            transaction_type: string_field(row, "type"),
            description: string_field(row, "description"),
            created_at: timestamp_field(row, "created_at"),
        }
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
