// storefront_app/src/db/orders.rs

use super::map_sqlx_error;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::HashMap;
use storefront::model::{Order, OrderLine};
use storefront::{OrderStore, StoreError, StoreResult};
use tracing::{debug, instrument};
use uuid::Uuid;

const ORDER: &str = "order";

#[derive(sqlx::FromRow)]
struct OrderRow {
  id: Uuid,
  user_id: Uuid,
  total_price: Decimal,
  created_at: DateTime<Utc>,
}

impl OrderRow {
  fn into_order(self, lines: Vec<OrderLine>) -> Order {
    Order {
      id: self.id,
      user_id: self.user_id,
      lines,
      total_price: self.total_price,
      created_at: self.created_at,
    }
  }
}

const SELECT_LINES: &str = "SELECT id, order_id, product_id, quantity, price_at_purchase FROM order_items";

/// Orders in `orders`, their lines in `order_items`.
#[derive(Clone)]
pub struct PgOrderStore {
  pool: PgPool,
}

impl PgOrderStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl OrderStore for PgOrderStore {
  #[instrument(name = "PgOrderStore::insert", skip_all, fields(order_id = %order.id, lines = order.lines.len()), err(Display))]
  async fn insert(&self, order: &Order) -> StoreResult<()> {
    let map_err = |e| map_sqlx_error(ORDER, e);
    let mut tx = self.pool.begin().await.map_err(map_err)?;

    sqlx::query("INSERT INTO orders (id, user_id, total_price, created_at) VALUES ($1, $2, $3, $4)")
      .bind(order.id)
      .bind(order.user_id)
      .bind(order.total_price)
      .bind(order.created_at)
      .execute(&mut *tx)
      .await
      .map_err(map_err)?;

    for (position, line) in order.lines.iter().enumerate() {
      sqlx::query(
        "INSERT INTO order_items (id, order_id, position, product_id, quantity, price_at_purchase) \
         VALUES ($1, $2, $3, $4, $5, $6)",
      )
      .bind(line.id)
      .bind(order.id)
      .bind(position as i32)
      .bind(line.product_id)
      .bind(line.quantity)
      .bind(line.price_at_purchase)
      .execute(&mut *tx)
      .await
      .map_err(map_err)?;
    }

    tx.commit().await.map_err(map_err)?;
    debug!("Order persisted.");
    Ok(())
  }

  async fn get(&self, id: Uuid) -> StoreResult<Order> {
    let map_err = |e| map_sqlx_error(ORDER, e);
    let row: OrderRow = sqlx::query_as("SELECT id, user_id, total_price, created_at FROM orders WHERE id = $1")
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(map_err)?
      .ok_or_else(|| StoreError::not_found(ORDER, id))?;

    let sql = format!("{} WHERE order_id = $1 ORDER BY position", SELECT_LINES);
    let lines: Vec<OrderLine> = sqlx::query_as(&sql)
      .bind(id)
      .fetch_all(&self.pool)
      .await
      .map_err(map_err)?;
    Ok(row.into_order(lines))
  }

  async fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Order>> {
    let map_err = |e| map_sqlx_error(ORDER, e);
    let rows: Vec<OrderRow> =
      sqlx::query_as("SELECT id, user_id, total_price, created_at FROM orders WHERE user_id = $1 ORDER BY created_at, id")
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)?;
    if rows.is_empty() {
      return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let sql = format!("{} WHERE order_id = ANY($1) ORDER BY order_id, position", SELECT_LINES);
    let all_lines: Vec<OrderLine> = sqlx::query_as(&sql)
      .bind(ids)
      .fetch_all(&self.pool)
      .await
      .map_err(map_err)?;

    let mut by_order: HashMap<Uuid, Vec<OrderLine>> = HashMap::new();
    for line in all_lines {
      by_order.entry(line.order_id).or_default().push(line);
    }
    Ok(
      rows
        .into_iter()
        .map(|row| {
          let lines = by_order.remove(&row.id).unwrap_or_default();
          row.into_order(lines)
        })
        .collect(),
    )
  }

  #[instrument(name = "PgOrderStore::delete", skip(self), err(Display))]
  async fn delete(&self, id: Uuid) -> StoreResult<()> {
    // order_items go with it (ON DELETE CASCADE).
    let result = sqlx::query("DELETE FROM orders WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(|e| map_sqlx_error(ORDER, e))?;
    if result.rows_affected() == 0 {
      return Err(StoreError::not_found(ORDER, id));
    }
    Ok(())
  }
}
