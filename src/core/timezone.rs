use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::core::{AppError, Result};

/// Largest offsets a real-world timezone uses (UTC-12:00 and UTC+14:00)
pub const MIN_OFFSET_MINUTES: i32 = -12 * 60;
pub const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Build the reporting timezone from an offset in minutes east of UTC
pub fn reporting_offset(minutes: i32) -> Result<FixedOffset> {
    if !(MIN_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
        return Err(AppError::Configuration(format!(
            "Reporting UTC offset must be between {} and {} minutes, got {}",
            MIN_OFFSET_MINUTES, MAX_OFFSET_MINUTES, minutes
        )));
    }

    FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
        AppError::Configuration(format!("Invalid reporting UTC offset: {} minutes", minutes))
    })
}

/// Instant at which the local calendar date `date` begins in `tz`
///
/// Fails when local midnight does not exist in `tz` (a DST gap).
pub fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Result<DateTime<Utc>> {
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
        AppError::invalid_period(format!("No midnight for calendar date {}", date))
    })?;

    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| {
            AppError::invalid_period(format!(
                "Local midnight of {} does not exist in the reporting timezone",
                date
            ))
        })
}

/// Calendar date of `now` as seen in `tz`
pub fn local_date<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    now.with_timezone(tz).date_naive()
}

/// First day of the calendar month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the calendar year containing `date`
pub fn first_of_year(date: NaiveDate) -> NaiveDate {
    date.with_ordinal(1).unwrap_or(date)
}
