use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::metrics::{TimeRange, TrendPoint};

/// Vendor earnings and payouts over a period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Resolved reporting window
    pub period: TimeRange,
    pub transaction_count: u64,
    /// Sum of all incoming amounts
    pub total_revenue: Decimal,
    /// Incoming amounts that have settled
    pub total_earnings: Decimal,
    /// Sum of outgoing amounts, as a positive number
    pub total_withdrawals: Decimal,
    /// Incoming amounts still processing
    pub pending_amount: Decimal,
    /// Mean signed transaction amount
    pub average_transaction: Decimal,
    /// Earnings minus withdrawals
    pub net_balance: Decimal,
    /// Incoming amounts per bucket, oldest first
    pub revenue_trend: Vec<TrendPoint>,
}

impl FinancialSummary {
    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }
}
