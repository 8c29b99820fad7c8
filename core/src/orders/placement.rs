// storefront/src/orders/placement.rs

//! Order placement as a four-step pipeline over a shared checkout context:
//!
//! 1. `validate_order_request`: at least one line.
//! 2. `reserve_line_items`: per line, in submission order: quantity check,
//!    catalog lookup, ledger reservation. Rollback releases every reservation
//!    this call made, newest first.
//! 3. `compute_order_total`: Σ price_at_purchase × quantity, bounded by
//!    `Order::max_total`.
//! 4. `persist_order`: order and lines written together.
//!
//! Any failure leaves the state `Rejected`, nothing persisted and every
//! product's stock where it started.

use super::store::OrderStore;
use crate::catalog::CatalogStore;
use crate::core::ContextData;
use crate::error::{LedgerError, OrderPlacementError, PipelineError, StoreError, StoreResult, ValidationError};
use crate::inventory::{release_reservation, InventoryLedger, Reservation};
use crate::model::{LineRequest, Order, OrderLine, OrderState};
use crate::pipeline::Pipeline;
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

const VALIDATE_ORDER_REQUEST: &str = "validate_order_request";
const RESERVE_LINE_ITEMS: &str = "reserve_line_items";
const COMPUTE_ORDER_TOTAL: &str = "compute_order_total";
const PERSIST_ORDER: &str = "persist_order";

/// Underlying data of the checkout pipeline.
#[derive(Debug, Clone)]
pub struct CheckoutCtxData {
  pub user_id: Uuid,
  pub order_id: Uuid,
  pub requested: Vec<LineRequest>,
  /// Successful reservations of this call, in the order they were made.
  pub reservations: Vec<Reservation>,
  pub lines: Vec<OrderLine>,
  pub total_price: Decimal,
  pub placed: Option<Order>,
  pub state: OrderState,
}

impl CheckoutCtxData {
  pub fn new(user_id: Uuid, requested: Vec<LineRequest>) -> Self {
    Self {
      user_id,
      order_id: Uuid::new_v4(),
      requested,
      reservations: Vec::new(),
      lines: Vec::new(),
      total_price: Decimal::ZERO,
      placed: None,
      state: OrderState::Pending,
    }
  }
}

/// Entry point of the order aggregate.
pub struct OrderPlacement {
  orders: Arc<dyn OrderStore>,
  pipeline: Pipeline<CheckoutCtxData, OrderPlacementError>,
}

impl std::fmt::Debug for OrderPlacement {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("OrderPlacement").field("pipeline", &self.pipeline).finish()
  }
}

impl OrderPlacement {
  pub fn new(catalog: Arc<dyn CatalogStore>, ledger: Arc<dyn InventoryLedger>, orders: Arc<dyn OrderStore>) -> Self {
    let pipeline = build_checkout_pipeline(catalog, ledger, orders.clone());
    Self { orders, pipeline }
  }

  /// Places an order for `user_id`, all or nothing.
  #[instrument(
    name = "OrderPlacement::place_order",
    skip(self, lines),
    fields(user_id = %user_id, line_count = lines.len())
  )]
  pub async fn place_order(&self, user_id: Uuid, lines: Vec<LineRequest>) -> Result<Order, OrderPlacementError> {
    let ctx_data = ContextData::new(CheckoutCtxData::new(user_id, lines));
    let order_id = ctx_data.read().order_id;
    debug!(%order_id, "Order pending.");

    if let Err(e) = self.pipeline.run(ctx_data.clone()).await {
      ctx_data.write().state = OrderState::Rejected;
      warn!(%order_id, reason = e.reason(), error = %e, "Order rejected.");
      return Err(e);
    }

    let placed = {
      let mut guard = ctx_data.write();
      guard.state = OrderState::Placed;
      guard.placed.take()
    };
    let order = placed.ok_or_else(|| PipelineError::MissingOutput {
      step_name: PERSIST_ORDER.to_string(),
    })?;
    info!(%order_id, total_price = %order.total_price, "Order placed.");
    Ok(order)
  }

  pub async fn get_order(&self, id: Uuid) -> StoreResult<Order> {
    self.orders.get(id).await
  }

  pub async fn list_orders_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Order>> {
    self.orders.list_for_user(user_id).await
  }

  /// Deletes an order and its lines. Reserved stock is NOT returned.
  #[instrument(name = "OrderPlacement::delete_order", skip(self))]
  pub async fn delete_order(&self, id: Uuid) -> StoreResult<()> {
    self.orders.delete(id).await
  }
}

fn build_checkout_pipeline(
  catalog: Arc<dyn CatalogStore>,
  ledger: Arc<dyn InventoryLedger>,
  orders: Arc<dyn OrderStore>,
) -> Pipeline<CheckoutCtxData, OrderPlacementError> {
  let mut p = Pipeline::<CheckoutCtxData, OrderPlacementError>::new(&[
    (VALIDATE_ORDER_REQUEST, false),
    (RESERVE_LINE_ITEMS, false),
    (COMPUTE_ORDER_TOTAL, false),
    (PERSIST_ORDER, false),
  ]);

  p.on_step(VALIDATE_ORDER_REQUEST, |ctx_data: ContextData<CheckoutCtxData>| async move {
    if ctx_data.read().requested.is_empty() {
      return Err(OrderPlacementError::ValidationFailed(ValidationError::new(
        "order_items",
        "An order must contain at least one item.",
      )));
    }
    Ok(())
  });

  let reserve_catalog = catalog;
  let reserve_ledger = ledger.clone();
  p.on_step(RESERVE_LINE_ITEMS, move |ctx_data: ContextData<CheckoutCtxData>| {
    let catalog = reserve_catalog.clone();
    let ledger = reserve_ledger.clone();
    async move {
      let (order_id, requests) = ctx_data.with(|d| (d.order_id, d.requested.clone()));

      for (idx, request) in requests.iter().enumerate() {
        let line = idx + 1;
        let product_id = request.product_id;

        if request.quantity < 1 {
          return Err(OrderPlacementError::InvalidQuantity {
            line,
            product_id,
            quantity: request.quantity,
          });
        }

        match catalog.get_product(product_id).await {
          Ok(snapshot) => debug!(line, %product_id, stock = snapshot.stock_quantity, "Product found."),
          Err(StoreError::NotFound { .. }) => return Err(OrderPlacementError::ProductNotFound { line, product_id }),
          Err(e) => return Err(e.into()),
        }

        let reservation = ledger
          .reserve(product_id, request.quantity)
          .await
          .map_err(|e| match e {
            LedgerError::InsufficientStock {
              requested, available, ..
            } => OrderPlacementError::InsufficientStock {
              line,
              product_id,
              requested,
              available,
            },
            LedgerError::UnknownProduct(_) => OrderPlacementError::ProductNotFound { line, product_id },
            LedgerError::Store(e) => OrderPlacementError::Store(e),
          })?;

        {
          let mut guard = ctx_data.write();
          guard.reservations.push(reservation);
          guard.lines.push(OrderLine {
            id: Uuid::new_v4(),
            order_id,
            product_id,
            quantity: reservation.quantity,
            price_at_purchase: reservation.unit_price,
          });
        }
      }
      Ok(())
    }
  });

  let rollback_ledger = ledger;
  p.on_rollback(RESERVE_LINE_ITEMS, move |ctx_data: ContextData<CheckoutCtxData>| {
    let ledger = rollback_ledger.clone();
    async move {
      let reservations = {
        let mut guard = ctx_data.write();
        guard.lines.clear();
        std::mem::take(&mut guard.reservations)
      };

      let mut first_failure = None;
      for reservation in reservations.iter().rev() {
        match release_reservation(ledger.as_ref(), reservation).await {
          Ok(()) => debug!(product_id = %reservation.product_id, quantity = reservation.quantity, "Reservation released."),
          Err(e) => {
            error!(product_id = %reservation.product_id, quantity = reservation.quantity, error = %e, "Failed to release reservation.");
            first_failure.get_or_insert(e);
          }
        }
      }
      match first_failure {
        Some(e) => Err(OrderPlacementError::Store(e)),
        None => Ok(()),
      }
    }
  });

  p.on_step(COMPUTE_ORDER_TOTAL, |ctx_data: ContextData<CheckoutCtxData>| async move {
    let mut guard = ctx_data.write();
    let total = Order::compute_total(&guard.lines);
    if total > Order::max_total() {
      return Err(OrderPlacementError::ValidationFailed(ValidationError::new(
        "total_price",
        format!("Order total may not exceed {}.", Order::max_total()),
      )));
    }
    guard.total_price = total;
    Ok(())
  });

  p.on_step(PERSIST_ORDER, move |ctx_data: ContextData<CheckoutCtxData>| {
    let orders = orders.clone();
    async move {
      let order = ctx_data.with(|d| Order {
        id: d.order_id,
        user_id: d.user_id,
        lines: d.lines.clone(),
        total_price: d.total_price,
        created_at: Utc::now(),
      });
      orders.insert(&order).await?;
      ctx_data.write().placed = Some(order);
      Ok::<_, OrderPlacementError>(())
    }
  });

  p
}
