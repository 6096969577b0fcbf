use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fleetmetrics::config::{AppConfig, Config};
use fleetmetrics::modules::health;
use fleetmetrics::reports::{controllers, MySqlRecordSource, ReportService};

fn init_tracing(app: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("fleetmetrics={},actix_web=info", app.log_level).into());
    let registry = tracing_subscriber::registry().with(filter);

    if app.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config.app);
    config.validate().context("Configuration validation failed")?;

    tracing::info!("Starting fleet metrics service");
    tracing::info!("Environment: {}", config.app.env);

    let timezone = config.report_timezone()?;
    let pool = config
        .database
        .create_pool()
        .context("Failed to create database pool")?;
    tracing::info!(
        max_connections = config.database.max_connections,
        report_offset = %timezone,
        "Record database pool initialized"
    );

    let service = web::Data::new(ReportService::with_system_clock(
        Arc::new(MySqlRecordSource::new(pool.clone())),
        timezone,
    ));
    let pool = web::Data::new(pool);

    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(service.clone())
            .app_data(pool.clone())
            .configure(health::configure)
            .configure(controllers::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
