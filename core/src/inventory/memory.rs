// storefront/src/inventory/memory.rs

//! `InventoryLedger` over the in-memory product table. Stock lives on the
//! product row itself; the row mutex is the per-product exclusion.

use super::{InventoryLedger, Reservation};
use crate::error::LedgerError;
use crate::model::Product;
use crate::repository::InMemoryRepository;
use async_trait::async_trait;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

#[async_trait]
impl InventoryLedger for InMemoryRepository<Product> {
  #[instrument(name = "ledger::reserve", skip(self), err(Display))]
  async fn reserve(&self, product_id: Uuid, quantity: i32) -> Result<Reservation, LedgerError> {
    let row = self.row(product_id).ok_or(LedgerError::UnknownProduct(product_id))?;
    let mut product = row.lock();
    if quantity < 1 || product.stock_quantity < quantity {
      warn!(available = product.stock_quantity, "Reservation refused.");
      return Err(LedgerError::InsufficientStock {
        product_id,
        requested: quantity,
        available: product.stock_quantity,
      });
    }
    product.stock_quantity -= quantity;
    debug!(remaining = product.stock_quantity, "Stock reserved.");
    Ok(Reservation {
      product_id,
      quantity,
      unit_price: product.price,
      remaining: product.stock_quantity,
    })
  }

  #[instrument(name = "ledger::release", skip(self), err(Display))]
  async fn release(&self, product_id: Uuid, quantity: i32) -> Result<(), LedgerError> {
    let row = self.row(product_id).ok_or(LedgerError::UnknownProduct(product_id))?;
    let mut product = row.lock();
    product.stock_quantity = product.stock_quantity.saturating_add(quantity);
    debug!(stock = product.stock_quantity, "Stock released.");
    Ok(())
  }

  async fn available(&self, product_id: Uuid) -> Result<i32, LedgerError> {
    let row = self.row(product_id).ok_or(LedgerError::UnknownProduct(product_id))?;
    let stock = row.lock().stock_quantity;
    Ok(stock)
  }
}
