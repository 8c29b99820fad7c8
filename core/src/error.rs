// storefront/src/error.rs

//! Error types for every layer of the storefront core.
//!
//! - [`ValidationError`]: a single field-level rule failed.
//! - [`StoreError`]: anything a repository / catalog / order store can report.
//! - [`LedgerError`]: outcome of a failed stock reservation.
//! - [`PipelineError`]: misconfiguration of a step pipeline.
//! - [`OrderPlacementError`]: why an order was rejected.

use anyhow::Error as AnyhowError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
  pub field: String,
  pub message: String,
}

impl ValidationError {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      field: field.into(),
      message: message.into(),
    }
  }
}

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("{resource} {id} not found")]
  NotFound { resource: &'static str, id: Uuid },

  #[error("Conflict: {0}")]
  Conflict(String),

  #[error("Validation failed: {0}")]
  Validation(#[from] ValidationError),

  #[error("Storage backend failure. Source: {source}")]
  Backend {
    #[source]
    source: AnyhowError,
  },
}

impl StoreError {
  pub fn not_found(resource: &'static str, id: Uuid) -> Self {
    StoreError::NotFound { resource, id }
  }

  /// Wraps any backend error (sqlx, io, ...) as an opaque `Backend` failure.
  pub fn backend<E>(err: E) -> Self
  where
    E: Into<AnyhowError>,
  {
    StoreError::Backend { source: err.into() }
  }
}

impl From<AnyhowError> for StoreError {
  fn from(err: AnyhowError) -> Self {
    StoreError::Backend { source: err }
  }
}

#[derive(Debug, Error)]
pub enum LedgerError {
  #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
  InsufficientStock {
    product_id: Uuid,
    requested: i32,
    available: i32,
  },

  #[error("Product {0} is not tracked by the inventory ledger")]
  UnknownProduct(Uuid),

  #[error(transparent)]
  Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Pipeline completed but step '{step_name}' left no output in the context")]
  MissingOutput { step_name: String },
}

/// Reasons an order placement is rejected. `line` is 1-based, in submission order.
#[derive(Debug, Error)]
pub enum OrderPlacementError {
  #[error("Line {line}: product {product_id} not found")]
  ProductNotFound { line: usize, product_id: Uuid },

  #[error("Line {line}: invalid quantity {quantity} for product {product_id}; must be at least 1")]
  InvalidQuantity {
    line: usize,
    product_id: Uuid,
    quantity: i32,
  },

  #[error("Line {line}: not enough stock for product {product_id}. Requested {requested}, only {available} left")]
  InsufficientStock {
    line: usize,
    product_id: Uuid,
    requested: i32,
    available: i32,
  },

  #[error("Order validation failed: {0}")]
  ValidationFailed(#[from] ValidationError),

  #[error("Order store failure: {0}")]
  Store(#[from] StoreError),

  #[error("Checkout pipeline error: {0}")]
  Pipeline(#[from] PipelineError),
}

impl OrderPlacementError {
  /// Short machine-readable kind, used in API error payloads.
  pub fn reason(&self) -> &'static str {
    match self {
      OrderPlacementError::ProductNotFound { .. } => "product_not_found",
      OrderPlacementError::InvalidQuantity { .. } => "invalid_quantity",
      OrderPlacementError::InsufficientStock { .. } => "insufficient_stock",
      OrderPlacementError::ValidationFailed(_) => "validation_failed",
      OrderPlacementError::Store(_) => "store_failure",
      OrderPlacementError::Pipeline(_) => "pipeline_failure",
    }
  }

  /// The offending line and product, when the rejection is tied to one line.
  pub fn failing_line(&self) -> Option<(usize, Uuid)> {
    match self {
      OrderPlacementError::ProductNotFound { line, product_id }
      | OrderPlacementError::InvalidQuantity { line, product_id, .. }
      | OrderPlacementError::InsufficientStock { line, product_id, .. } => Some((*line, *product_id)),
      _ => None,
    }
  }

  /// Client mistakes (as opposed to backend / configuration failures).
  pub fn is_client_error(&self) -> bool {
    !matches!(
      self,
      OrderPlacementError::Store(StoreError::Backend { .. }) | OrderPlacementError::Pipeline(_)
    )
  }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
