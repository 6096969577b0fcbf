//! Aggregate functions shared by every report.
//!
//! All functions are pure and total: empty input yields zero, a record whose
//! accessor returns `None` contributes nothing, and no function divides by zero.
//! Running totals saturate at `Decimal::MAX` / `Decimal::MIN` instead of
//! overflowing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use super::bucketer::{bucketize, Granularity};
use super::period::TimeRange;

/// Per-group total produced by [`group_totals`] and [`top_n`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTotal<K> {
    pub key: K,
    pub total: Decimal,
    pub count: u64,
}

/// One point of a trend series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub bucket_start: DateTime<Utc>,
    pub value: Decimal,
}

/// Sum of present values
pub fn sum<'a, T: 'a, F>(records: impl IntoIterator<Item = &'a T>, value: F) -> Decimal
where
    F: Fn(&T) -> Option<Decimal>,
{
    records
        .into_iter()
        .filter_map(|r| value(r))
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Number of records matching `predicate`
pub fn count<'a, T: 'a, P>(records: impl IntoIterator<Item = &'a T>, predicate: P) -> u64
where
    P: Fn(&T) -> bool,
{
    records.into_iter().filter(|r| predicate(r)).count() as u64
}

/// Arithmetic mean of present values, zero when none are present
pub fn mean<'a, T: 'a, F>(records: impl IntoIterator<Item = &'a T>, value: F) -> Decimal
where
    F: Fn(&T) -> Option<Decimal>,
{
    let values: Vec<Decimal> = records.into_iter().filter_map(|r| value(r)).collect();
    let n = Decimal::from(values.len());

    let exact = values
        .iter()
        .try_fold(Decimal::ZERO, |total, v| total.checked_add(*v));

    match exact {
        Some(total) => ratio(total, n),
        // Total does not fit: average the shares instead
        None => values
            .iter()
            .map(|v| ratio(*v, n))
            .fold(Decimal::ZERO, Decimal::saturating_add),
    }
}

/// Percentage of records matching `predicate`, zero for empty input
pub fn rate<'a, T: 'a, P>(records: impl IntoIterator<Item = &'a T>, predicate: P) -> Decimal
where
    P: Fn(&T) -> bool,
{
    let (matching, total) = records
        .into_iter()
        .fold((0u64, 0u64), |(matching, total), r| {
            (matching + u64::from(predicate(r)), total + 1)
        });

    percentage(Decimal::from(matching), Decimal::from(total))
}

/// Count per allowed key; every allowed key is present, zero-filled
pub fn distribution<'a, T: 'a, K, F>(
    records: impl IntoIterator<Item = &'a T>,
    key: F,
    allowed_keys: &[K],
) -> BTreeMap<K, u64>
where
    K: Ord + Clone,
    F: Fn(&T) -> Option<K>,
{
    let mut counts: BTreeMap<K, u64> = allowed_keys.iter().map(|k| (k.clone(), 0)).collect();

    for record in records {
        if let Some(slot) = key(record).and_then(|k| counts.get_mut(&k)) {
            *slot += 1;
        }
    }

    counts
}

/// Sum `value` per group, groups in first-encountered order
///
/// Records without a group key are skipped; records without a value still
/// count towards their group.
pub fn group_totals<'a, T: 'a, K, G, F>(
    records: impl IntoIterator<Item = &'a T>,
    group: G,
    value: F,
) -> Vec<GroupTotal<K>>
where
    K: Eq + Hash + Clone,
    G: Fn(&T) -> Option<K>,
    F: Fn(&T) -> Option<Decimal>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<GroupTotal<K>> = Vec::new();

    for record in records {
        let Some(key) = group(record) else {
            continue;
        };
        let idx = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(GroupTotal {
                key,
                total: Decimal::ZERO,
                count: 0,
            });
            groups.len() - 1
        });
        let entry = &mut groups[idx];
        entry.total = entry.total.saturating_add(value(record).unwrap_or(Decimal::ZERO));
        entry.count += 1;
    }

    groups
}

/// The `n` groups with the largest totals
///
/// Stable: groups with equal totals keep first-encountered order.
pub fn top_n<'a, T: 'a, K, G, F>(
    records: impl IntoIterator<Item = &'a T>,
    group: G,
    value: F,
    n: usize,
) -> Vec<GroupTotal<K>>
where
    K: Eq + Hash + Clone,
    G: Fn(&T) -> Option<K>,
    F: Fn(&T) -> Option<Decimal>,
{
    let mut groups = group_totals(records, group, value);
    groups.sort_by(|a, b| b.total.cmp(&a.total));
    groups.truncate(n);
    groups
}

/// The `n` most recent records, newest first
///
/// Records without a timestamp are excluded; ties keep input order.
pub fn latest<'a, T: 'a, F>(
    records: impl IntoIterator<Item = &'a T>,
    timestamp: F,
    n: usize,
) -> Vec<&'a T>
where
    F: Fn(&T) -> Option<DateTime<Utc>>,
{
    let mut stamped: Vec<(DateTime<Utc>, &'a T)> = records
        .into_iter()
        .filter_map(|r| timestamp(r).map(|ts| (ts, r)))
        .collect();
    stamped.sort_by(|a, b| b.0.cmp(&a.0));
    stamped.into_iter().take(n).map(|(_, r)| r).collect()
}

/// Apply `aggregate` to each bucket of `range`, oldest first, with no gaps
pub fn trend<T, F, A>(
    range: &TimeRange,
    granularity: Granularity,
    records: &[T],
    timestamp: F,
    aggregate: A,
) -> Vec<TrendPoint>
where
    F: Fn(&T) -> Option<DateTime<Utc>>,
    A: Fn(&[&T]) -> Decimal,
{
    bucketize(range, granularity, records, timestamp)
        .into_iter()
        .map(|bucket| TrendPoint {
            bucket_start: bucket.range.from,
            value: aggregate(&bucket.records),
        })
        .collect()
}

/// `numerator / denominator`, zero when the denominator is zero
pub fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// `part / whole * 100`, zero when `whole` is zero
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    match part.checked_mul(Decimal::ONE_HUNDRED) {
        Some(scaled) => ratio(scaled, whole),
        None => ratio(part, whole).saturating_mul(Decimal::ONE_HUNDRED),
    }
}
