// storefront/src/orders/store.rs

use crate::error::{StoreError, StoreResult};
use crate::model::Order;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

const ORDER: &str = "order";

/// Persistence for placed orders. An order and its lines are written together
/// or not at all; there is no update path.
#[async_trait]
pub trait OrderStore: Send + Sync {
  async fn insert(&self, order: &Order) -> StoreResult<()>;

  async fn get(&self, id: Uuid) -> StoreResult<Order>;

  /// Orders placed by `user_id`, oldest first.
  async fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Order>>;

  /// Removes the order and its lines. Stock is not given back.
  async fn delete(&self, id: Uuid) -> StoreResult<()>;
}

#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
  orders: RwLock<HashMap<Uuid, Order>>,
}

impl InMemoryOrderStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.orders.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.orders.read().is_empty()
  }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
  async fn insert(&self, order: &Order) -> StoreResult<()> {
    let mut orders = self.orders.write();
    if orders.contains_key(&order.id) {
      return Err(StoreError::Conflict(format!("order {} already exists", order.id)));
    }
    orders.insert(order.id, order.clone());
    Ok(())
  }

  async fn get(&self, id: Uuid) -> StoreResult<Order> {
    self.orders.read().get(&id).cloned().ok_or_else(|| StoreError::not_found(ORDER, id))
  }

  async fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Order>> {
    let mut orders: Vec<Order> = self
      .orders
      .read()
      .values()
      .filter(|o| o.user_id == user_id)
      .cloned()
      .collect();
    orders.sort_by_key(|o| (o.created_at, o.id));
    Ok(orders)
  }

  async fn delete(&self, id: Uuid) -> StoreResult<()> {
    match self.orders.write().remove(&id) {
      Some(_) => Ok(()),
      None => Err(StoreError::not_found(ORDER, id)),
    }
  }
}
