// storefront_app/src/db/inventory.rs

//! The product table as catalog and inventory ledger.
//!
//! A reservation is a single conditional `UPDATE`: the row lock PostgreSQL
//! takes for it is the per-product exclusion, and the `WHERE stock_quantity >= $2`
//! guard is the check. No separate read precedes the decrement.

use super::{map_sqlx_error, PgRepository};
use async_trait::async_trait;
use rust_decimal::Decimal;
use storefront::model::{Product, ProductSnapshot};
use storefront::{CatalogStore, InventoryLedger, LedgerError, Reservation, Resource, StoreError, StoreResult};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

#[async_trait]
impl CatalogStore for PgRepository<Product> {
  async fn get_product(&self, id: Uuid) -> StoreResult<ProductSnapshot> {
    let row: Option<(Uuid, String, Decimal, i32)> =
      sqlx::query_as("SELECT id, name, price, stock_quantity FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| map_sqlx_error(Product::NAME, e))?;
    let (id, name, price, stock_quantity) = row.ok_or_else(|| StoreError::not_found(Product::NAME, id))?;
    Ok(ProductSnapshot {
      id,
      name,
      price,
      stock_quantity,
    })
  }
}

#[async_trait]
impl InventoryLedger for PgRepository<Product> {
  #[instrument(name = "pg_ledger::reserve", skip(self), err(Display))]
  async fn reserve(&self, product_id: Uuid, quantity: i32) -> Result<Reservation, LedgerError> {
    if quantity >= 1 {
      let reserved: Option<(Decimal, i32)> = sqlx::query_as(
        "UPDATE products SET stock_quantity = stock_quantity - $2 \
         WHERE id = $1 AND stock_quantity >= $2 \
         RETURNING price, stock_quantity",
      )
      .bind(product_id)
      .bind(quantity)
      .fetch_optional(self.pool())
      .await
      .map_err(|e| map_sqlx_error(Product::NAME, e))?;

      if let Some((unit_price, remaining)) = reserved {
        debug!(remaining, "Stock reserved.");
        return Ok(Reservation {
          product_id,
          quantity,
          unit_price,
          remaining,
        });
      }
    }

    // Either the product is gone or the guard refused; tell them apart.
    let available = self.available(product_id).await?;
    warn!(available, "Reservation refused.");
    Err(LedgerError::InsufficientStock {
      product_id,
      requested: quantity,
      available,
    })
  }

  #[instrument(name = "pg_ledger::release", skip(self), err(Display))]
  async fn release(&self, product_id: Uuid, quantity: i32) -> Result<(), LedgerError> {
    let result = sqlx::query("UPDATE products SET stock_quantity = stock_quantity + $2 WHERE id = $1")
      .bind(product_id)
      .bind(quantity)
      .execute(self.pool())
      .await
      .map_err(|e| map_sqlx_error(Product::NAME, e))?;
    if result.rows_affected() == 0 {
      return Err(LedgerError::UnknownProduct(product_id));
    }
    debug!("Stock released.");
    Ok(())
  }

  async fn available(&self, product_id: Uuid) -> Result<i32, LedgerError> {
    let stock: Option<i32> = sqlx::query_scalar("SELECT stock_quantity FROM products WHERE id = $1")
      .bind(product_id)
      .fetch_optional(self.pool())
      .await
      .map_err(|e| map_sqlx_error(Product::NAME, e))?;
    stock.ok_or(LedgerError::UnknownProduct(product_id))
  }
}
