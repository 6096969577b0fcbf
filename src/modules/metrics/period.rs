use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::timezone::{first_of_month, first_of_year, local_date, local_midnight};
use crate::core::{AppError, Result};

/// Longest custom reporting window accepted, in days
pub const MAX_CUSTOM_RANGE_DAYS: i64 = 366;

/// Half-open time range `[from, to)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeRange")]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeRange {
    /// Create a range, rejecting `from > to`
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self> {
        if from > to {
            return Err(AppError::invalid_period(format!(
                "Range start ({}) must not be after its end ({})",
                from.to_rfc3339(),
                to.to_rfc3339()
            )));
        }
        Ok(Self { from, to })
    }

    /// `from <= instant < to`
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant < self.to
    }

    pub fn duration(&self) -> Duration {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Deserialize)]
struct RawTimeRange {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = AppError;

    fn try_from(raw: RawTimeRange) -> Result<Self> {
        TimeRange::new(raw.from, raw.to)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.from.to_rfc3339(), self.to.to_rfc3339())
    }
}

/// Symbolic reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodToken {
    /// Start of the current calendar day to now
    Today,
    /// Rolling seven days ending now
    Week,
    /// Start of the current calendar month to now
    Month,
    /// Start of the current calendar year to now
    Year,
}

impl PeriodToken {
    pub const ALL: [PeriodToken; 4] = [
        PeriodToken::Today,
        PeriodToken::Week,
        PeriodToken::Month,
        PeriodToken::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodToken::Today => "today",
            PeriodToken::Week => "week",
            PeriodToken::Month => "month",
            PeriodToken::Year => "year",
        }
    }
}

impl fmt::Display for PeriodToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodToken {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(PeriodToken::Today),
            "week" => Ok(PeriodToken::Week),
            "month" => Ok(PeriodToken::Month),
            "year" => Ok(PeriodToken::Year),
            _ => Err(AppError::invalid_period(format!(
                "Unrecognized period token '{}' (expected today, week, month or year)",
                s
            ))),
        }
    }
}

/// Resolve `token` against `now` using UTC calendar boundaries
pub fn resolve(token: PeriodToken, now: DateTime<Utc>) -> Result<TimeRange> {
    resolve_in(token, now, &Utc)
}

/// Resolve `token` against `now` with calendar boundaries taken in `tz`
///
/// `week` is a rolling window and does not depend on `tz`.
pub fn resolve_in<Tz: TimeZone>(token: PeriodToken, now: DateTime<Utc>, tz: &Tz) -> Result<TimeRange> {
    let today = local_date(now, tz);
    let from = match token {
        PeriodToken::Today => local_midnight(today, tz)?,
        PeriodToken::Week => now - Duration::days(7),
        PeriodToken::Month => local_midnight(first_of_month(today), tz)?,
        PeriodToken::Year => local_midnight(first_of_year(today), tz)?,
    };

    // DST shifts can push local midnight past `now`
    TimeRange::new(from.min(now), now)
}

/// Reporting window requested by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReportPeriod {
    Preset { token: PeriodToken },
    Custom { range: TimeRange },
}

impl ReportPeriod {
    pub fn preset(token: PeriodToken) -> Self {
        ReportPeriod::Preset { token }
    }

    pub fn custom(range: TimeRange) -> Self {
        ReportPeriod::Custom { range }
    }

    /// The preset token, if any
    pub fn token(&self) -> Option<PeriodToken> {
        match self {
            ReportPeriod::Preset { token } => Some(*token),
            ReportPeriod::Custom { .. } => None,
        }
    }

    /// Resolve to a concrete range
    ///
    /// Custom ranges must be ordered, end no later than `now` and span at
    /// most [`MAX_CUSTOM_RANGE_DAYS`] days.
    pub fn resolve<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> Result<TimeRange> {
        match self {
            ReportPeriod::Preset { token } => resolve_in(*token, now, tz),
            ReportPeriod::Custom { range } => {
                // Public fields can bypass the ordering check in `new`
                let range = TimeRange::new(range.from, range.to)?;
                if range.to > now {
                    return Err(AppError::invalid_period(format!(
                        "Custom range end ({}) cannot be in the future (now is {})",
                        range.to.to_rfc3339(),
                        now.to_rfc3339()
                    )));
                }
                let days = range.duration().num_days();
                if range.duration() > Duration::days(MAX_CUSTOM_RANGE_DAYS) {
                    return Err(AppError::invalid_period(format!(
                        "Custom range too large: {} days (maximum {} days)",
                        days, MAX_CUSTOM_RANGE_DAYS
                    )));
                }
                Ok(range)
            }
        }
    }

    /// Build a period from HTTP query values
    ///
    /// `period` defaults to `month`. `custom` requires both bounds; a bare
    /// `to` date is inclusive and therefore extended to the following midnight.
    pub fn from_query(period: Option<&str>, from: Option<&str>, to: Option<&str>) -> Result<Self> {
        let period = period.map(str::trim).filter(|p| !p.is_empty()).unwrap_or("month");

        if !period.eq_ignore_ascii_case("custom") {
            if from.is_some() || to.is_some() {
                return Err(AppError::invalid_period(format!(
                    "'from'/'to' are only accepted with period=custom (got period={})",
                    period
                )));
            }
            return Ok(Self::preset(period.parse()?));
        }

        let (Some(from), Some(to)) = (from, to) else {
            return Err(AppError::invalid_period(
                "period=custom requires both 'from' and 'to'",
            ));
        };

        let from = parse_bound(from, false)?;
        let to = parse_bound(to, true)?;
        Ok(Self::custom(TimeRange::new(from, to)?))
    }
}

impl From<PeriodToken> for ReportPeriod {
    fn from(token: PeriodToken) -> Self {
        ReportPeriod::preset(token)
    }
}

fn parse_bound(value: &str, inclusive_end: bool) -> Result<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let date = if inclusive_end {
            date.succ_opt().ok_or_else(|| {
                AppError::invalid_period(format!("Date out of range: '{}'", value))
            })?
        } else {
            date
        };
        return local_midnight(date, &Utc);
    }

    Err(AppError::invalid_period(format!(
        "Invalid date '{}'. Expected YYYY-MM-DD or RFC 3339",
        value
    )))
}
