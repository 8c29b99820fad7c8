// storefront_app/src/main.rs

mod config;
mod db;
mod errors;
mod services;
mod state;
mod web;

use crate::config::{AppConfig, LogFormat, StoreBackend};
use crate::errors::AppError;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
  // RUST_LOG overrides the default level.
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE);
  match format {
    LogFormat::Pretty => builder.init(),
    LogFormat::Json => builder.json().init(),
  }
}

async fn build_state(app_config: Arc<AppConfig>) -> Result<AppState, AppError> {
  match &app_config.backend {
    StoreBackend::Memory => {
      tracing::warn!("Using the in-memory store backend; data is lost on restart.");
      Ok(AppState::in_memory(app_config.clone()))
    }
    StoreBackend::Postgres {
      database_url,
      max_connections,
      run_migrations,
    } => {
      let db_pool = PgPoolOptions::new()
        .max_connections(*max_connections)
        .connect(database_url)
        .await?;
      tracing::info!("Successfully connected to the database.");

      if *run_migrations {
        sqlx::migrate!("./migrations")
          .run(&db_pool)
          .await
          .map_err(|e| AppError::Internal(format!("Database migration failed: {}", e)))?;
        tracing::info!("Database migrations applied.");
      }
      Ok(AppState::postgres(db_pool, app_config.clone()))
    }
  }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      eprintln!("Failed to load application configuration: {}", e);
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };
  init_tracing(app_config.log_format);
  tracing::info!(backend = app_config.backend_name(), "Starting storefront server...");

  let app_state = build_state(app_config.clone()).await.map_err(|e| {
    tracing::error!(error = %e, "Failed to initialize the store backend.");
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
  })?;

  if app_config.seed_db {
    if let Err(e) = db::seed::seed_demo_catalog(&app_state).await {
      tracing::error!(error = %e, "Failed to seed database.");
    }
  }

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
