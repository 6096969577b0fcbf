// End-to-end report scenarios over an in-memory record source
//
// Covers the reference scenarios for each report, owner isolation, period
// filtering, idempotence of repeated calls and concurrent use of one service.

#[path = "../helpers/mod.rs"]
mod helpers;

use chrono::{TimeZone, Utc};
use futures_util::future::join_all;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use fleetmetrics::metrics::{PeriodToken, ReportPeriod, TimeRange};
use fleetmetrics::records::RecordKind;
use fleetmetrics::reports::InMemoryRecordSource;
use helpers::*;

fn month() -> ReportPeriod {
    ReportPeriod::preset(PeriodToken::Month)
}

#[tokio::test]
async fn test_financial_summary_scenario() {
    let service = service_over(Arc::new(seeded_source().await));

    let summary = service.financial_summary(OWNER, &month()).await.unwrap();

    assert_eq!(summary.transaction_count, 2);
    assert_eq!(summary.total_revenue, dec!(300));
    assert_eq!(summary.total_earnings, dec!(100));
    assert_eq!(summary.pending_amount, dec!(200));
    assert_eq!(summary.total_withdrawals, Decimal::ZERO);
    assert_eq!(summary.net_balance, dec!(100));
    assert_eq!(summary.average_transaction, dec!(150));
}

#[tokio::test]
async fn test_review_statistics_scenario() {
    let service = service_over(Arc::new(seeded_source().await));

    let stats = service.review_statistics(OWNER, &month()).await.unwrap();

    assert_eq!(stats.total_reviews, 5);
    assert_eq!(stats.average_rating, dec!(3.6));
    let distribution: Vec<(u8, u64)> = stats.rating_distribution.into_iter().collect();
    assert_eq!(distribution, vec![(1, 1), (2, 0), (3, 1), (4, 1), (5, 2)]);
    assert_eq!(stats.response_rate, Decimal::ZERO);
}

#[tokio::test]
async fn test_maintenance_with_no_logs_scenario() {
    let service = service_over(Arc::new(InMemoryRecordSource::new()));

    let analysis = service.maintenance_cost_analysis(OWNER, &month()).await.unwrap();

    assert_eq!(analysis.total_cost, Decimal::ZERO);
    assert!(analysis.cost_by_type.is_empty());
    assert_eq!(analysis.cost_per_km, Decimal::ZERO);
    assert_eq!(analysis.average_cost, Decimal::ZERO);
}

#[tokio::test]
async fn test_maintenance_cost_analysis() {
    let service = service_over(Arc::new(seeded_source().await));

    let analysis = service.maintenance_cost_analysis(OWNER, &month()).await.unwrap();

    assert_eq!(analysis.log_count, 3);
    assert_eq!(analysis.total_cost, dec!(1200));
    assert_eq!(analysis.average_cost, dec!(400));
    assert_eq!(analysis.cost_by_type[0].maintenance_type, "repair");
    assert_eq!(analysis.top_vehicles[0].vehicle_id, "v1");
    assert_eq!(analysis.top_vehicles[0].total_cost, dec!(800));
    // v1 drove 2000 km between services; v2 has a single reading
    assert_eq!(analysis.total_distance, dec!(2000));
    assert_eq!(analysis.cost_per_km, dec!(0.6));
}

#[tokio::test]
async fn test_vehicle_maintenance_only_sees_that_vehicle() {
    let service = service_over(Arc::new(seeded_source().await));

    let analysis = service
        .vehicle_maintenance_cost_analysis(OWNER, "v2", &month())
        .await
        .unwrap();

    assert_eq!(analysis.vehicle_id.as_deref(), Some("v2"));
    assert_eq!(analysis.log_count, 1);
    assert_eq!(analysis.total_cost, dec!(400));
}

#[tokio::test]
async fn test_dashboard_uses_only_records_in_period() {
    let service = service_over(Arc::new(seeded_source().await));

    let dashboard = service.dashboard_analytics(OWNER, &month()).await.unwrap();

    // b0 was created in October
    assert_eq!(dashboard.total_bookings, 3);
    assert_eq!(dashboard.completed_bookings, 2);
    assert_eq!(dashboard.total_revenue, dec!(1100));
    assert_eq!(dashboard.average_rating, dec!(3.6));
    assert_eq!(dashboard.occupancy_rate, dec!(66.67));
    assert_eq!(dashboard.top_vehicles[0].vehicle_id, "v1");
    assert_eq!(dashboard.recent_bookings[0].id.as_deref(), Some("b3"));

    // 2025-11-01T00:00Z .. 2025-11-15T12:00Z, oldest bucket clipped
    assert_eq!(dashboard.booking_trend.len(), 15);
    let booked: Decimal = dashboard.booking_trend.iter().map(|p| p.value).sum();
    assert_eq!(booked, dec!(3));

    let year = service
        .dashboard_analytics(OWNER, &ReportPeriod::preset(PeriodToken::Year))
        .await
        .unwrap();
    assert_eq!(year.total_bookings, 4);
}

#[tokio::test]
async fn test_yearly_financial_trend_is_monthly() {
    let service = service_over(Arc::new(seeded_source().await));

    let summary = service
        .financial_summary(OWNER, &ReportPeriod::preset(PeriodToken::Year))
        .await
        .unwrap();

    assert_eq!(summary.revenue_trend.len(), 11);
    assert_eq!(summary.revenue_trend.last().unwrap().value, dec!(300));
}

#[tokio::test]
async fn test_custom_period() {
    let service = service_over(Arc::new(seeded_source().await));
    let range = TimeRange::new(
        Utc.with_ymd_and_hms(2025, 11, 4, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 11, 5, 0, 0, 0).unwrap(),
    )
    .unwrap();

    let summary = service
        .financial_summary(OWNER, &ReportPeriod::custom(range))
        .await
        .unwrap();

    assert_eq!(summary.period, range);
    assert_eq!(summary.total_revenue, dec!(200));
    assert_eq!(summary.revenue_trend.len(), 1);
}

#[tokio::test]
async fn test_owners_are_isolated() {
    let service = service_over(Arc::new(seeded_source().await));

    let other = service.financial_summary(OTHER_OWNER, &month()).await.unwrap();
    assert_eq!(other.total_revenue, dec!(9999));

    let unknown = service.review_statistics("vendor-404", &month()).await.unwrap();
    assert_eq!(unknown.total_reviews, 0);
    assert_eq!(unknown.average_rating, Decimal::ZERO);
    assert_eq!(unknown.rating_distribution.len(), 5);
}

#[tokio::test]
async fn test_malformed_rows_degrade_instead_of_failing() {
    let source = InMemoryRecordSource::new();
    source
        .insert(
            OWNER,
            RecordKind::Transactions,
            vec![
                TestDataFactory::transaction_row(100, "completed", "2025-11-03T10:00:00Z"),
                serde_json::json!({"amount": "n/a", "status": 42, "created_at": "2025-11-03T11:00:00Z"}),
            ],
        )
        .await;
    let service = service_over(Arc::new(source));

    let summary = service.financial_summary(OWNER, &month()).await.unwrap();

    assert_eq!(summary.transaction_count, 2);
    assert_eq!(summary.total_revenue, dec!(100));
    assert_eq!(summary.average_transaction, dec!(100));
}

#[tokio::test]
async fn test_amounts_at_decimal_max_do_not_abort_reports() {
    let huge = Decimal::MAX.to_string();
    let source = InMemoryRecordSource::new();
    source
        .insert(
            OWNER,
            RecordKind::Transactions,
            vec![
                serde_json::json!({"amount": huge, "status": "completed", "created_at": "2025-11-03T10:00:00Z"}),
                serde_json::json!({"amount": huge, "status": "completed", "created_at": "2025-11-04T10:00:00Z"}),
            ],
        )
        .await;
    let service = service_over(Arc::new(source));

    let summary = service.financial_summary(OWNER, &month()).await.unwrap();

    assert_eq!(summary.total_revenue, Decimal::MAX);
    assert_eq!(summary.net_balance, Decimal::MAX);
    assert_eq!(summary.average_transaction, Decimal::MAX);
}

#[tokio::test]
async fn test_repeated_calls_are_byte_identical() {
    let service = service_over(Arc::new(seeded_source().await));

    let first = serde_json::to_string(&service.dashboard_analytics(OWNER, &month()).await.unwrap())
        .unwrap();
    let second = serde_json::to_string(&service.dashboard_analytics(OWNER, &month()).await.unwrap())
        .unwrap();
    assert_eq!(first, second);

    let first = serde_json::to_string(&service.review_statistics(OWNER, &month()).await.unwrap())
        .unwrap();
    let second = serde_json::to_string(&service.review_statistics(OWNER, &month()).await.unwrap())
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_calls_match_sequential_results() {
    let source = seeded_source().await;
    source
        .insert(
            OTHER_OWNER,
            RecordKind::Reviews,
            vec![
                TestDataFactory::answered_review_row(4, "2025-11-06T08:00:00Z"),
                TestDataFactory::answered_review_row(2, "2025-11-07T08:00:00Z"),
            ],
        )
        .await;
    let service = Arc::new(service_over(Arc::new(source)));

    let expected_owner = service.review_statistics(OWNER, &month()).await.unwrap();
    let expected_other = service.review_statistics(OTHER_OWNER, &month()).await.unwrap();
    assert_eq!(expected_other.response_rate, dec!(100));
    assert_eq!(expected_other.complete_sub_rating_count, 2);

    let calls = (0..32).map(|i| {
        let service = Arc::clone(&service);
        let owner = if i % 2 == 0 { OWNER } else { OTHER_OWNER };
        tokio::spawn(async move {
            let stats = service.review_statistics(owner, &month()).await.unwrap();
            (owner, stats)
        })
    });

    for joined in join_all(calls).await {
        let (owner, stats) = joined.unwrap();
        let expected = if owner == OWNER { &expected_owner } else { &expected_other };
        assert_eq!(&stats, expected);
    }
}
