// Contract tests for the analytics HTTP API
//
// Verifies routes, status codes and the JSON shapes clients depend on:
// 200 with the report body, 400 for bad periods and 503 when the record
// source is down, both rendered as {"error": {"message", "code"}}.

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{test, web, App};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use std::sync::Arc;

use fleetmetrics::modules::health;
use fleetmetrics::reports::{controllers, RecordSource};
use helpers::*;

macro_rules! init_app {
    ($source:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(service_over($source)))
                .configure(health::configure)
                .configure(controllers::configure),
        )
        .await
    };
}

/// Decimals are serialized as strings
fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

async fn seeded() -> Arc<dyn RecordSource> {
    Arc::new(seeded_source().await)
}

#[actix_web::test]
async fn test_dashboard_returns_report() {
    let app = init_app!(seeded().await);

    let req = test::TestRequest::get()
        .uri(&format!("/api/vendors/{}/analytics/dashboard", OWNER))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total_bookings"], 3);
    assert!(body["period"]["from"].is_string());
    assert!(body["revenue_trend"].is_array());
    assert!(body["top_vehicles"][0]["vehicle_id"].is_string());
}

#[actix_web::test]
async fn test_financial_summary_with_period() {
    let app = init_app!(seeded().await);

    let req = test::TestRequest::get()
        .uri(&format!("/api/vendors/{}/analytics/financial-summary?period=year", OWNER))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(decimal(&body["total_revenue"]), dec!(300));
    assert_eq!(decimal(&body["pending_amount"]), dec!(200));
    assert_eq!(body["revenue_trend"].as_array().unwrap().len(), 11);
}

#[actix_web::test]
async fn test_review_statistics_distribution_shape() {
    let app = init_app!(seeded().await);

    let req = test::TestRequest::get()
        .uri(&format!("/api/vendors/{}/analytics/reviews?period=month", OWNER))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let distribution = body["rating_distribution"].as_object().unwrap();
    let keys: Vec<&str> = distribution.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["1", "2", "3", "4", "5"]);
    assert_eq!(distribution["5"], 2);
    assert_eq!(decimal(&body["average_rating"]), dec!(3.6));
}

#[actix_web::test]
async fn test_maintenance_routes() {
    let app = init_app!(seeded().await);

    let req = test::TestRequest::get()
        .uri(&format!("/api/vendors/{}/analytics/maintenance-costs", OWNER))
        .to_request();
    let fleet: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fleet["log_count"], 3);
    assert!(fleet["vehicle_id"].is_null());

    let req = test::TestRequest::get()
        .uri(&format!("/api/vendors/{}/analytics/vehicles/v1/maintenance-costs", OWNER))
        .to_request();
    let vehicle: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(vehicle["vehicle_id"], "v1");
    assert_eq!(vehicle["log_count"], 2);
}

#[actix_web::test]
async fn test_custom_range_query() {
    let app = init_app!(seeded().await);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/vendors/{}/analytics/financial-summary?period=custom&from=2025-11-04&to=2025-11-04",
            OWNER
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(decimal(&body["total_revenue"]), dec!(200));
}

#[actix_web::test]
async fn test_unknown_period_is_bad_request() {
    let app = init_app!(seeded().await);

    for query in ["period=fortnight", "period=custom&from=2025-11-01", "period=week&from=2025-11-01"] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/vendors/{}/analytics/dashboard?{}", OWNER, query))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "{query}");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], 400);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid period"));
    }
}

#[actix_web::test]
async fn test_source_outage_is_service_unavailable() {
    let app = init_app!(Arc::new(FailingRecordSource::always()));

    let req = test::TestRequest::get()
        .uri(&format!("/api/vendors/{}/analytics/reviews", OWNER))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 503);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 503);
}

#[actix_web::test]
async fn test_health_check() {
    let app = init_app!(seeded().await);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
}
