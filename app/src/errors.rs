// storefront_app/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use storefront::{OrderPlacementError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Conflict: {0}")]
  Conflict(String),

  #[error("Order rejected: {0}")]
  OrderRejected(OrderPlacementError),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Storage Error: {0}")]
  Store(StoreError),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<StoreError> for AppError {
  fn from(err: StoreError) -> Self {
    match err {
      StoreError::NotFound { .. } => AppError::NotFound(err.to_string()),
      StoreError::Conflict(msg) => AppError::Conflict(msg),
      StoreError::Validation(v) => AppError::Validation(v.to_string()),
      backend @ StoreError::Backend { .. } => AppError::Store(backend),
    }
  }
}

impl From<OrderPlacementError> for AppError {
  fn from(err: OrderPlacementError) -> Self {
    AppError::OrderRejected(err)
  }
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::Internal(err.to_string())
  }
}

/// Body of a rejected order: the message, a machine-readable reason and, when
/// the rejection is tied to a line, which line and product caused it.
fn order_rejection_body(err: &OrderPlacementError) -> serde_json::Value {
  let mut body = json!({ "error": err.to_string(), "reason": err.reason() });
  if let Some((line, product_id)) = err.failing_line() {
    body["line"] = json!(line);
    body["product"] = json!(product_id);
  }
  match err {
    OrderPlacementError::InsufficientStock {
      requested, available, ..
    } => {
      body["requested"] = json!(requested);
      body["available"] = json!(available);
    }
    OrderPlacementError::InvalidQuantity { quantity, .. } => {
      body["requested"] = json!(quantity);
    }
    OrderPlacementError::ValidationFailed(v) => {
      body["field"] = json!(v.field);
    }
    _ => {}
  }
  body
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Conflict(_) => StatusCode::CONFLICT,
      AppError::OrderRejected(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
      AppError::OrderRejected(_)
      | AppError::Config(_)
      | AppError::Sqlx(_)
      | AppError::Store(_)
      | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Responding with error");
    }

    let mut response = HttpResponse::build(status);
    match self {
      AppError::Validation(m) | AppError::Auth(m) | AppError::NotFound(m) | AppError::Conflict(m) => {
        response.json(json!({ "error": m }))
      }
      AppError::OrderRejected(e) if e.is_client_error() => response.json(order_rejection_body(e)),
      AppError::OrderRejected(e) => {
        response.json(json!({ "error": "Order could not be placed", "reason": e.reason() }))
      }
      AppError::Config(m) => response.json(json!({ "error": "Configuration issue", "detail": m })),
      AppError::Sqlx(_) | AppError::Store(_) => response.json(json!({ "error": "Database operation failed" })),
      AppError::Internal(m) => response.json(json!({ "error": "An internal error occurred", "detail": m })),
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
