use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use super::period::{PeriodToken, TimeRange};

/// Longest range that still gets day-granularity trends when no token applies
pub const MAX_DAILY_RANGE_DAYS: i64 = 62;

/// Width of one trend bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// 24 hours
    Day,
    /// One calendar month
    Month,
}

impl Granularity {
    /// `year` is bucketed by month, every shorter period by day
    pub fn for_period(token: PeriodToken) -> Self {
        match token {
            PeriodToken::Year => Granularity::Month,
            PeriodToken::Today | PeriodToken::Week | PeriodToken::Month => Granularity::Day,
        }
    }

    /// Granularity for a range with no period token behind it
    pub fn for_range(range: &TimeRange) -> Self {
        if range.duration() > Duration::days(MAX_DAILY_RANGE_DAYS) {
            Granularity::Month
        } else {
            Granularity::Day
        }
    }

    /// Start of the `k`-th bucket counting back from `end`
    ///
    /// `None` once the step leaves chrono's representable range.
    fn step_back(&self, end: DateTime<Utc>, k: u32) -> Option<DateTime<Utc>> {
        match self {
            Granularity::Day => end.checked_sub_signed(Duration::days(i64::from(k))),
            Granularity::Month => end.checked_sub_months(Months::new(k)),
        }
    }
}

/// One fixed-width slice of a range and the records falling inside it
#[derive(Debug, Clone)]
pub struct Bucket<'a, T> {
    pub range: TimeRange,
    pub records: Vec<&'a T>,
}

/// Bucket boundaries for `range`, oldest first
///
/// Boundaries are laid out backwards from `range.to`, so the newest bucket is
/// always a full step wide and only the oldest one may be clipped to
/// `range.from`. The result tiles `range` exactly; an empty range has no buckets.
pub fn bucket_ranges(range: &TimeRange, granularity: Granularity) -> Vec<TimeRange> {
    let mut ranges = Vec::new();
    let mut end = range.to;
    let mut k: u32 = 1;

    while end > range.from {
        let start = granularity
            .step_back(range.to, k)
            .map_or(range.from, |start| start.max(range.from));
        ranges.push(TimeRange { from: start, to: end });
        end = start;
        k = k.saturating_add(1);
    }

    ranges.reverse();
    ranges
}

/// Split `records` into contiguous buckets covering `range`
///
/// Records without a timestamp, or whose timestamp lies outside `range`, are
/// dropped.
pub fn bucketize<'a, T, F>(
    range: &TimeRange,
    granularity: Granularity,
    records: &'a [T],
    timestamp_of: F,
) -> Vec<Bucket<'a, T>>
where
    F: Fn(&T) -> Option<DateTime<Utc>>,
{
    let mut buckets: Vec<Bucket<'a, T>> = bucket_ranges(range, granularity)
        .into_iter()
        .map(|range| Bucket {
            range,
            records: Vec::new(),
        })
        .collect();

    for record in records {
        let Some(ts) = timestamp_of(record) else {
            continue;
        };
        if !range.contains(ts) {
            continue;
        }
        let idx = buckets.partition_point(|bucket| bucket.range.to <= ts);
        if let Some(bucket) = buckets.get_mut(idx) {
            bucket.records.push(record);
        }
    }

    buckets
}
