use super::round2;
use crate::modules::metrics::aggregators::{mean, sum, trend};
use crate::modules::metrics::{Granularity, TimeRange};
use crate::modules::records::{Transaction, TransactionStatus};
use crate::modules::reports::models::FinancialSummary;

/// Summarize a vendor's transactions over `period`
///
/// Income is every positive amount; earnings and pending are the income that
/// is `completed` and `processing` respectively. Withdrawals are negative
/// amounts reported as a positive total.
pub fn assemble_financial_summary(
    period: TimeRange,
    granularity: Granularity,
    transactions: &[Transaction],
) -> FinancialSummary {
    let income_with_status = |status: TransactionStatus| {
        move |t: &Transaction| t.income().filter(|_| t.has_status(status))
    };

    let total_earnings = sum(transactions, income_with_status(TransactionStatus::Completed));
    let total_withdrawals = sum(transactions, Transaction::outflow);

    FinancialSummary {
        period,
        transaction_count: transactions.len() as u64,
        total_revenue: sum(transactions, Transaction::income),
        total_earnings,
        total_withdrawals,
        pending_amount: sum(transactions, income_with_status(TransactionStatus::Processing)),
        average_transaction: round2(mean(transactions, |t| t.amount)),
        net_balance: total_earnings.saturating_sub(total_withdrawals),
        revenue_trend: trend(&period, granularity, transactions, |t| t.created_at, |bucket| {
            sum(bucket.iter().copied(), Transaction::income)
        }),
    }
}
