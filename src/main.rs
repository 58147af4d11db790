use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fleetrent::config::{Config, DatabaseConfig};
use fleetrent::middleware::{
    json_error_handler, query_error_handler, ApiKeyAuth, ErrorLogger, RateLimiter, RequestId,
};
use fleetrent::modules::{self, legal::DocumentStorage, legal::LegalDocumentGenerator};

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("fleetrent={},actix_web=info", config.app.log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.app.log_format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config);
    config.validate().context("Configuration validation failed")?;

    tracing::info!(
        env = config.app.env.as_str(),
        currency = %config.app.default_currency,
        utc_offset_hours = config.app.utc_offset_hours,
        storage = config.storage.is_some(),
        "Starting fleetrent"
    );

    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;
    DatabaseConfig::run_migrations(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!(
        max_connections = config.database.max_connections,
        "Database ready"
    );

    let currency = config.app.default_currency;
    let clock = config.business_clock();
    let generator = Arc::new(
        LegalDocumentGenerator::new(config.company.clone())
            .context("Failed to compile legal document templates")?,
    );
    let storage = DocumentStorage::from_config(config.storage.as_ref());
    let rate_limiter = RateLimiter::new(config.security.rate_limit_per_minute)?;
    let cors_origin = config.security.cors_allowed_origin.clone();

    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        let cors = match cors_origin {
            Some(ref origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header()
                .max_age(3600),
            None => Cors::default(),
        };

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(currency))
            .app_data(web::Data::new(clock))
            .app_data(web::Data::from(generator.clone()))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .wrap(ApiKeyAuth::new(db_pool.clone()))
            .wrap(rate_limiter.clone())
            .wrap(cors)
            .wrap(ErrorLogger)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .configure(modules::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!(address = bind_address.as_str(), "Server started");

    server.await?;
    Ok(())
}
