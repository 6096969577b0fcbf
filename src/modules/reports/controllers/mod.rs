mod analytics_controller;

pub use analytics_controller::ReportQuery;

/// Register every analytics route
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    analytics_controller::configure_routes(cfg);
}
