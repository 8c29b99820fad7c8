// storefront/src/model/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a placement stands. `Placed` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
  /// Lines are being validated and reserved.
  Pending,
  /// Every reservation succeeded, the total is fixed and the order is persisted.
  Placed,
  /// A line failed; all reservations of the call were released and nothing was persisted.
  Rejected,
}

/// One `(product, quantity)` pair as submitted by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRequest {
  #[serde(rename = "product")]
  pub product_id: Uuid,
  pub quantity: i32,
}

impl LineRequest {
  pub fn new(product_id: Uuid, quantity: i32) -> Self {
    LineRequest { product_id, quantity }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct OrderLine {
  pub id: Uuid,
  #[serde(skip_serializing)]
  pub order_id: Uuid,
  #[serde(rename = "product")]
  pub product_id: Uuid,
  pub quantity: i32,
  /// Unit price captured when stock was reserved.
  pub price_at_purchase: Decimal,
}

impl OrderLine {
  pub fn subtotal(&self) -> Decimal {
    self.price_at_purchase * Decimal::from(self.quantity)
  }
}

/// A placed order. Immutable once persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
  pub id: Uuid,
  #[serde(rename = "user")]
  pub user_id: Uuid,
  #[serde(rename = "order_items")]
  pub lines: Vec<OrderLine>,
  pub total_price: Decimal,
  pub created_at: DateTime<Utc>,
}

impl Order {
  /// Largest total an order may reach (sixteen integer digits, two decimals).
  pub fn max_total() -> Decimal {
    Decimal::new(999_999_999_999_999_999, 2)
  }

  /// Sum of every line's `price_at_purchase × quantity`.
  pub fn compute_total(lines: &[OrderLine]) -> Decimal {
    lines.iter().map(OrderLine::subtotal).sum()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn line(price: Decimal, quantity: i32) -> OrderLine {
    OrderLine {
      id: Uuid::new_v4(),
      order_id: Uuid::nil(),
      product_id: Uuid::new_v4(),
      quantity,
      price_at_purchase: price,
    }
  }

  #[test]
  fn total_is_sum_of_line_subtotals() {
    let lines = vec![line(dec!(10.00), 3), line(dec!(0.99), 2), line(dec!(1250.50), 1)];
    assert_eq!(Order::compute_total(&lines), dec!(1282.48));
  }

  #[test]
  fn empty_total_is_zero() {
    assert_eq!(Order::compute_total(&[]), Decimal::ZERO);
  }

  #[test]
  fn serializes_with_api_field_names() {
    let order = Order {
      id: Uuid::new_v4(),
      user_id: Uuid::new_v4(),
      lines: vec![line(dec!(10.00), 3)],
      total_price: dec!(30.00),
      created_at: Utc::now(),
    };
    let json = serde_json::to_string(&order).unwrap();
    assert!(json.contains("\"user\""));
    assert!(json.contains("\"order_items\""));
    assert!(json.contains("\"total_price\":\"30.00\""));
    assert!(!json.contains("order_id"));
  }
}
