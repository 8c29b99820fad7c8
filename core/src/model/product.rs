// storefront/src/model/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{check_length, check_url};
use crate::error::ValidationError;
use crate::repository::Resource;

/// Largest price a product may carry (ten digits, two of them decimals).
fn max_price() -> Decimal {
  Decimal::new(9_999_999_999, 2)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Product {
  pub id: Uuid,
  pub name: String,
  pub description: String,
  pub price: Decimal,
  #[serde(rename = "category")]
  pub category_id: Uuid,
  /// Never negative at rest. Only the inventory ledger decrements it.
  pub stock_quantity: i32,
  pub image_url: String,
  /// The caller that created the product. Kept across updates.
  pub created_by: Uuid,
  pub created_date: DateTime<Utc>,
  pub updated_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProductDraft {
  pub name: String,
  pub description: String,
  pub price: Decimal,
  pub category_id: Uuid,
  /// Opening stock. Ignored when the draft replaces an existing product:
  /// after creation only the inventory ledger moves stock.
  pub stock_quantity: i32,
  pub image_url: String,
  pub created_by: Uuid,
}

/// What the order workflow reads from the catalog: price and current stock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSnapshot {
  pub id: Uuid,
  pub name: String,
  pub price: Decimal,
  pub stock_quantity: i32,
}

impl From<&Product> for ProductSnapshot {
  fn from(p: &Product) -> Self {
    ProductSnapshot {
      id: p.id,
      name: p.name.clone(),
      price: p.price,
      stock_quantity: p.stock_quantity,
    }
  }
}

impl Resource for Product {
  type Draft = ProductDraft;
  const NAME: &'static str = "product";

  fn id(&self) -> Uuid {
    self.id
  }

  fn created_at(&self) -> DateTime<Utc> {
    self.created_date
  }

  fn validate(draft: &ProductDraft) -> Result<(), ValidationError> {
    let name = draft.name.trim();
    if name.is_empty() {
      return Err(ValidationError::new("name", "Name cannot be empty."));
    }
    if name.chars().count() < 3 {
      return Err(ValidationError::new("name", "Name must be at least 3 characters long."));
    }
    check_length("name", name, 3, 255)?;

    if draft.price <= Decimal::ZERO {
      return Err(ValidationError::new("price", "Price must be greater than 0."));
    }
    if draft.price.normalize().scale() > 2 {
      return Err(ValidationError::new("price", "Price may have at most 2 decimal places."));
    }
    if draft.price > max_price() {
      return Err(ValidationError::new("price", format!("Price may not exceed {}.", max_price())));
    }

    if draft.stock_quantity < 0 {
      return Err(ValidationError::new("stock_quantity", "Stock quantity cannot be negative."));
    }

    if !draft.image_url.is_empty() {
      check_url("image_url", &draft.image_url)?;
    }
    Ok(())
  }

  fn materialize(id: Uuid, draft: ProductDraft, now: DateTime<Utc>) -> Self {
    Product {
      id,
      name: draft.name.trim().to_string(),
      description: draft.description,
      price: draft.price.round_dp(2),
      category_id: draft.category_id,
      stock_quantity: draft.stock_quantity,
      image_url: draft.image_url,
      created_by: draft.created_by,
      created_date: now,
      updated_date: now,
    }
  }

  fn apply(&mut self, draft: ProductDraft, now: DateTime<Utc>) {
    self.name = draft.name.trim().to_string();
    self.description = draft.description;
    self.price = draft.price.round_dp(2);
    self.category_id = draft.category_id;
    self.image_url = draft.image_url;
    self.updated_date = now;
  }
}
