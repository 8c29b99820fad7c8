// storefront_app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

/// Where resources and orders are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
  Postgres {
    database_url: String,
    max_connections: u32,
    run_migrations: bool,
  },
  /// Process-local stores; everything is lost on restart.
  Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub backend: StoreBackend,
  pub log_format: LogFormat,
  // Seeds a demo category and a few products on startup.
  pub seed_db: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_vars(|name| env::var(name).ok())
  }

  /// Builds the configuration from any variable source. `from_env` passes the
  /// process environment.
  pub fn from_vars(get_var: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_or = |name: &str, default: &str| get_var(name).unwrap_or_else(|| default.to_string());

    let server_host = get_or("SERVER_HOST", "127.0.0.1");
    let server_port = get_or("SERVER_PORT", "8080")
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let backend = match get_or("STORE_BACKEND", "postgres").to_ascii_lowercase().as_str() {
      "memory" => StoreBackend::Memory,
      "postgres" => {
        let database_url = get_var("DATABASE_URL").ok_or_else(|| {
          AppError::Config("Missing environment variable 'DATABASE_URL' (required by STORE_BACKEND=postgres)".to_string())
        })?;
        let max_connections = get_or("DATABASE_MAX_CONNECTIONS", "10")
          .parse::<u32>()
          .map_err(|e| AppError::Config(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", e)))?;
        let run_migrations = parse_bool("RUN_MIGRATIONS", &get_or("RUN_MIGRATIONS", "true"))?;
        StoreBackend::Postgres {
          database_url,
          max_connections,
          run_migrations,
        }
      }
      other => {
        return Err(AppError::Config(format!(
          "Invalid STORE_BACKEND '{}': expected 'postgres' or 'memory'",
          other
        )))
      }
    };

    let log_format = match get_or("LOG_FORMAT", "pretty").to_ascii_lowercase().as_str() {
      "pretty" => LogFormat::Pretty,
      "json" => LogFormat::Json,
      other => {
        return Err(AppError::Config(format!(
          "Invalid LOG_FORMAT '{}': expected 'pretty' or 'json'",
          other
        )))
      }
    };

    let seed_db = parse_bool("SEED_DB", &get_or("SEED_DB", "false"))?;

    Ok(Self {
      server_host,
      server_port,
      backend,
      log_format,
      seed_db,
    })
  }

  pub fn backend_name(&self) -> &'static str {
    match self.backend {
      StoreBackend::Postgres { .. } => "postgres",
      StoreBackend::Memory => "memory",
    }
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
  value
    .parse::<bool>()
    .map_err(|e| AppError::Config(format!("Invalid {} value: {}", name, e)))
}
