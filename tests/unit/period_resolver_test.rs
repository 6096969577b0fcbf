// Property-based tests for period resolution
//
// Properties tested:
// 1. from <= to == now for every preset token, any offset
// 2. today/month/year start at a local midnight on the expected calendar day
// 3. week is exactly seven days wide
// 4. custom ranges are rejected when reversed, in the future or too wide

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveTime, TimeZone, Utc};
use proptest::prelude::*;

use fleetmetrics::core::AppError;
use fleetmetrics::metrics::period::MAX_CUSTOM_RANGE_DAYS;
use fleetmetrics::metrics::{resolve, resolve_in, PeriodToken, ReportPeriod, TimeRange};

fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    // 2000-01-01 .. 2100-01-01
    (946_684_800i64..4_102_444_800i64).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

fn offset() -> impl Strategy<Value = FixedOffset> {
    (-720i32..=840).prop_map(|minutes| FixedOffset::east_opt(minutes * 60).unwrap())
}

fn token() -> impl Strategy<Value = PeriodToken> {
    prop::sample::select(PeriodToken::ALL.to_vec())
}

proptest! {
    /// Property: every preset resolves to a non-inverted range ending at now
    #[test]
    fn test_resolved_range_ends_now(now in instant(), tz in offset(), token in token()) {
        let range = resolve_in(token, now, &tz).unwrap();
        prop_assert!(range.from <= range.to);
        prop_assert_eq!(range.to, now);
    }

    /// Property: calendar presets start at local midnight of the right day
    #[test]
    fn test_calendar_presets_start_at_local_midnight(now in instant(), tz in offset()) {
        let local_now = now.with_timezone(&tz);

        let today = resolve_in(PeriodToken::Today, now, &tz).unwrap().from.with_timezone(&tz);
        prop_assert_eq!(today.time(), NaiveTime::MIN);
        prop_assert_eq!(today.date_naive(), local_now.date_naive());

        let month = resolve_in(PeriodToken::Month, now, &tz).unwrap().from.with_timezone(&tz);
        prop_assert_eq!(month.time(), NaiveTime::MIN);
        prop_assert_eq!(month.day(), 1);
        prop_assert_eq!(month.month(), local_now.month());
        prop_assert_eq!(month.year(), local_now.year());

        let year = resolve_in(PeriodToken::Year, now, &tz).unwrap().from.with_timezone(&tz);
        prop_assert_eq!(year.time(), NaiveTime::MIN);
        prop_assert_eq!(year.ordinal(), 1);
        prop_assert_eq!(year.year(), local_now.year());
    }

    /// Property: week is a rolling seven-day window
    #[test]
    fn test_week_is_seven_days(now in instant(), tz in offset()) {
        let range = resolve_in(PeriodToken::Week, now, &tz).unwrap();
        prop_assert_eq!(range.duration(), Duration::days(7));
    }

    /// Property: presets nest (today within month within year)
    #[test]
    fn test_presets_nest(now in instant()) {
        let today = resolve(PeriodToken::Today, now).unwrap();
        let month = resolve(PeriodToken::Month, now).unwrap();
        let year = resolve(PeriodToken::Year, now).unwrap();

        prop_assert!(year.from <= month.from);
        prop_assert!(month.from <= today.from);
    }

    /// Property: a custom range inside the limits resolves to itself
    #[test]
    fn test_custom_range_passes_through(
        now in instant(),
        back_secs in 0i64..=86_400 * 30,
        span_secs in 0i64..=86_400 * MAX_CUSTOM_RANGE_DAYS,
    ) {
        let to = now - Duration::seconds(back_secs);
        let range = TimeRange::new(to - Duration::seconds(span_secs), to).unwrap();
        let resolved = ReportPeriod::custom(range).resolve(now, &Utc).unwrap();
        prop_assert_eq!(resolved, range);
    }
}

#[test]
fn test_unknown_tokens_are_invalid_period() {
    for bad in ["fortnight", "", "daily", "last_month"] {
        let err = bad.parse::<PeriodToken>().unwrap_err();
        assert!(matches!(err, AppError::InvalidPeriod(_)), "{bad}");
    }
}

#[test]
fn test_offset_moves_the_day_boundary() {
    // 2025-11-15T20:00Z is already the 16th in UTC+7
    let now = Utc.with_ymd_and_hms(2025, 11, 15, 20, 0, 0).unwrap();
    let jakarta = FixedOffset::east_opt(7 * 3600).unwrap();

    let utc_today = resolve(PeriodToken::Today, now).unwrap();
    let local_today = resolve_in(PeriodToken::Today, now, &jakarta).unwrap();

    assert_eq!(utc_today.from, Utc.with_ymd_and_hms(2025, 11, 15, 0, 0, 0).unwrap());
    assert_eq!(local_today.from, Utc.with_ymd_and_hms(2025, 11, 15, 17, 0, 0).unwrap());
}

#[test]
fn test_custom_range_limits() {
    let now = Utc.with_ymd_and_hms(2025, 11, 15, 12, 0, 0).unwrap();

    let future = TimeRange::new(now, now + Duration::hours(1)).unwrap();
    assert!(matches!(
        ReportPeriod::custom(future).resolve(now, &Utc),
        Err(AppError::InvalidPeriod(_))
    ));

    let too_wide = TimeRange::new(now - Duration::days(MAX_CUSTOM_RANGE_DAYS + 1), now).unwrap();
    assert!(matches!(
        ReportPeriod::custom(too_wide).resolve(now, &Utc),
        Err(AppError::InvalidPeriod(_))
    ));

    assert!(TimeRange::new(now, now - Duration::seconds(1)).is_err());
}

#[test]
fn test_period_from_query() {
    assert_eq!(
        ReportPeriod::from_query(None, None, None).unwrap(),
        ReportPeriod::preset(PeriodToken::Month)
    );
    assert_eq!(
        ReportPeriod::from_query(Some("YEAR"), None, None).unwrap(),
        ReportPeriod::preset(PeriodToken::Year)
    );

    let custom =
        ReportPeriod::from_query(Some("custom"), Some("2025-01-01"), Some("2025-01-31")).unwrap();
    let range = custom.resolve(Utc::now(), &Utc).unwrap();
    assert_eq!(range.from, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(range.to, Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap());

    assert!(ReportPeriod::from_query(Some("custom"), Some("2025-01-01"), None).is_err());
    assert!(ReportPeriod::from_query(Some("week"), Some("2025-01-01"), None).is_err());
    assert!(ReportPeriod::from_query(Some("custom"), Some("01/01/2025"), Some("2025-01-31")).is_err());
}
