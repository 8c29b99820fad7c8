// storefront/src/catalog.rs

//! Read-only product lookups used by the order workflow.

use crate::error::{StoreError, StoreResult};
use crate::model::{Product, ProductSnapshot};
use crate::repository::{InMemoryRepository, Resource};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait CatalogStore: Send + Sync {
  /// Current price and stock of a product, or `StoreError::NotFound`.
  async fn get_product(&self, id: Uuid) -> StoreResult<ProductSnapshot>;
}

#[async_trait]
impl CatalogStore for InMemoryRepository<Product> {
  async fn get_product(&self, id: Uuid) -> StoreResult<ProductSnapshot> {
    let row = self.row(id).ok_or_else(|| StoreError::not_found(Product::NAME, id))?;
    let snapshot = ProductSnapshot::from(&*row.lock());
    Ok(snapshot)
  }
}
