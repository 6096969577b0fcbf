use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::Result;
use crate::modules::metrics::ReportPeriod;
use crate::modules::reports::services::ReportService;

/// Query parameters shared by every analytics endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// `today`, `week`, `month`, `year` or `custom` (default: `month`)
    #[serde(default)]
    pub period: Option<String>,
    /// Start of a custom range (YYYY-MM-DD or RFC 3339)
    #[serde(default)]
    pub from: Option<String>,
    /// End of a custom range; a bare date is inclusive
    #[serde(default)]
    pub to: Option<String>,
}

impl ReportQuery {
    pub fn to_period(&self) -> Result<ReportPeriod> {
        ReportPeriod::from_query(
            self.period.as_deref(),
            self.from.as_deref(),
            self.to.as_deref(),
        )
    }
}

/// GET /api/vendors/{owner_id}/analytics/dashboard
pub async fn get_dashboard(
    service: web::Data<ReportService>,
    owner_id: web::Path<String>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse> {
    let period = query.to_period()?;
    let report = service.dashboard_analytics(&owner_id, &period).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// GET /api/vendors/{owner_id}/analytics/financial-summary
pub async fn get_financial_summary(
    service: web::Data<ReportService>,
    owner_id: web::Path<String>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse> {
    let period = query.to_period()?;
    let report = service.financial_summary(&owner_id, &period).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// GET /api/vendors/{owner_id}/analytics/maintenance-costs
pub async fn get_maintenance_costs(
    service: web::Data<ReportService>,
    owner_id: web::Path<String>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse> {
    let period = query.to_period()?;
    let report = service.maintenance_cost_analysis(&owner_id, &period).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// GET /api/vendors/{owner_id}/analytics/vehicles/{vehicle_id}/maintenance-costs
pub async fn get_vehicle_maintenance_costs(
    service: web::Data<ReportService>,
    path: web::Path<(String, String)>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse> {
    let (owner_id, vehicle_id) = path.into_inner();
    let period = query.to_period()?;
    let report = service
        .vehicle_maintenance_cost_analysis(&owner_id, &vehicle_id, &period)
        .await?;
    Ok(HttpResponse::Ok().json(report))
}

/// GET /api/vendors/{owner_id}/analytics/reviews
pub async fn get_review_statistics(
    service: web::Data<ReportService>,
    owner_id: web::Path<String>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse> {
    let period = query.to_period()?;
    let report = service.review_statistics(&owner_id, &period).await?;
    Ok(HttpResponse::Ok().json(report))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/vendors/{owner_id}/analytics")
            .route("/dashboard", web::get().to(get_dashboard))
            .route("/financial-summary", web::get().to(get_financial_summary))
            .route("/maintenance-costs", web::get().to(get_maintenance_costs))
            .route(
                "/vehicles/{vehicle_id}/maintenance-costs",
                web::get().to(get_vehicle_maintenance_costs),
            )
            .route("/reviews", web::get().to(get_review_statistics)),
    );
}
