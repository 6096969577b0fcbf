//! Period resolution, bucketing and the aggregate functions every report is built from.

pub mod aggregators;
pub mod bucketer;
pub mod period;

pub use aggregators::{GroupTotal, TrendPoint};
pub use bucketer::{bucketize, Bucket, Granularity};
pub use period::{resolve, resolve_in, PeriodToken, ReportPeriod, TimeRange};
