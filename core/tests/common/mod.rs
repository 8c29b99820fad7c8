// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use storefront::model::{Order, Product, ProductDraft};
use storefront::{
  InMemoryOrderStore, InMemoryRepository, OrderPlacement, OrderStore, Repository, StoreError, StoreResult,
};
use tracing::Level;
use uuid::Uuid;

/// A complete in-memory storefront: product table (which is also the catalog
/// and the inventory ledger), order store and the placement service.
pub struct Storefront {
  pub products: Arc<InMemoryRepository<Product>>,
  pub orders: Arc<InMemoryOrderStore>,
  pub placement: Arc<OrderPlacement>,
}

impl Storefront {
  pub fn new() -> Self {
    let products = Arc::new(InMemoryRepository::<Product>::new());
    let orders = Arc::new(InMemoryOrderStore::new());
    let placement = Arc::new(OrderPlacement::new(products.clone(), products.clone(), orders.clone()));
    Self {
      products,
      orders,
      placement,
    }
  }

  /// Same products, but an order store that always fails on insert.
  pub fn with_failing_order_store() -> Self {
    let products = Arc::new(InMemoryRepository::<Product>::new());
    let orders = Arc::new(InMemoryOrderStore::new());
    let placement = Arc::new(OrderPlacement::new(
      products.clone(),
      products.clone(),
      Arc::new(FailingOrderStore),
    ));
    Self {
      products,
      orders,
      placement,
    }
  }

  pub async fn add_product(&self, name: &str, price: Decimal, stock: i32) -> Product {
    self
      .products
      .create(product_draft(name, price, stock))
      .await
      .expect("seed product")
  }

  pub async fn stock_of(&self, id: Uuid) -> i32 {
    self.products.get(id).await.expect("product exists").stock_quantity
  }
}

pub fn product_draft(name: &str, price: Decimal, stock: i32) -> ProductDraft {
  ProductDraft {
    name: name.to_string(),
    description: String::new(),
    price,
    category_id: Uuid::new_v4(),
    stock_quantity: stock,
    image_url: String::new(),
    created_by: Uuid::new_v4(),
  }
}

pub struct FailingOrderStore;

#[async_trait]
impl OrderStore for FailingOrderStore {
  async fn insert(&self, _order: &Order) -> StoreResult<()> {
    Err(StoreError::backend(anyhow::anyhow!("connection reset by peer")))
  }

  async fn get(&self, id: Uuid) -> StoreResult<Order> {
    Err(StoreError::not_found("order", id))
  }

  async fn list_for_user(&self, _user_id: Uuid) -> StoreResult<Vec<Order>> {
    Ok(Vec::new())
  }

  async fn delete(&self, id: Uuid) -> StoreResult<()> {
    Err(StoreError::not_found("order", id))
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
