// storefront/src/inventory/mod.rs

//! The inventory ledger: the only component allowed to move stock counts.
//!
//! `reserve` is a check-and-decrement that is atomic per product; `release`
//! gives reserved units back. Every backend must guarantee that two concurrent
//! reservations on the same product never both succeed when the stock only
//! covers one of them.

pub mod memory;

use crate::error::{LedgerError, StoreError, StoreResult};
use crate::model::Product;
use crate::repository::Resource;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Proof of a successful reservation. Hand it back to [`InventoryLedger::release`]
/// to undo it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reservation {
  pub product_id: Uuid,
  pub quantity: i32,
  /// Product price read under the same exclusion as the decrement.
  pub unit_price: Decimal,
  /// Stock left right after this reservation.
  pub remaining: i32,
}

#[async_trait]
pub trait InventoryLedger: Send + Sync {
  /// Takes `quantity` units if at least that many are in stock.
  ///
  /// `quantity` must be positive; callers validate it first.
  async fn reserve(&self, product_id: Uuid, quantity: i32) -> Result<Reservation, LedgerError>;

  /// Returns `quantity` previously reserved units to stock.
  async fn release(&self, product_id: Uuid, quantity: i32) -> Result<(), LedgerError>;

  /// Current stock of a product.
  async fn available(&self, product_id: Uuid) -> Result<i32, LedgerError>;
}

/// Convenience for rollbacks: release exactly what a reservation took.
pub async fn release_reservation(ledger: &dyn InventoryLedger, reservation: &Reservation) -> StoreResult<()> {
  match ledger.release(reservation.product_id, reservation.quantity).await {
    Ok(()) => Ok(()),
    Err(LedgerError::Store(e)) => Err(e),
    Err(LedgerError::UnknownProduct(id)) => Err(StoreError::not_found(Product::NAME, id)),
    Err(other @ LedgerError::InsufficientStock { .. }) => Err(StoreError::backend(anyhow::Error::new(other))),
  }
}
