// storefront_app/src/db/seed.rs

//! Demo catalog for local development (`SEED_DB=true`).

use crate::errors::Result;
use crate::services::auth_service;
use crate::state::AppState;
use rust_decimal::Decimal;
use storefront::model::{CategoryDraft, ProductDraft, UserDraft};
use storefront::StoreError;
use tracing::{info, instrument};
use uuid::Uuid;

const DEMO_CATEGORY_SLUG: &str = "electronics";

/// (name, description, price in cents, stock)
const DEMO_PRODUCTS: &[(&str, &str, i64, i32)] = &[
  ("Noise-cancelling headphones", "Over-ear, 30h battery.", 19_999, 25),
  ("4K monitor", "27 inch IPS panel.", 32_950, 10),
  ("Mechanical keyboard", "Hot-swappable switches.", 8_900, 40),
  ("USB-C hub", "7-in-1 with HDMI and card reader.", 3_499, 100),
];

/// Creates a demo owner, an "Electronics" category and a handful of products.
/// Does nothing when the category already exists.
#[instrument(name = "seed::demo_catalog", skip(state), err(Display))]
pub async fn seed_demo_catalog(state: &AppState) -> Result<()> {
  let category = match state
    .categories
    .create(CategoryDraft {
      name: "Electronics".to_string(),
      description: Some("Gadgets, peripherals and accessories.".to_string()),
      slug: DEMO_CATEGORY_SLUG.to_string(),
    })
    .await
  {
    Ok(category) => category,
    Err(StoreError::Conflict(_)) => {
      info!("Demo catalog already present, skipping seed.");
      return Ok(());
    }
    Err(e) => return Err(e.into()),
  };

  // The demo owner never signs in; its password is random and discarded.
  let owner = state
    .users
    .create(UserDraft {
      username: format!("demo-owner-{}", &Uuid::new_v4().simple().to_string()[..8]),
      email: "demo-owner@example.com".to_string(),
      password_hash: Some(auth_service::hash_password(&Uuid::new_v4().to_string())?),
    })
    .await?;

  for (name, description, cents, stock) in DEMO_PRODUCTS {
    state
      .products
      .create(ProductDraft {
        name: name.to_string(),
        description: description.to_string(),
        price: Decimal::new(*cents, 2),
        category_id: category.id,
        stock_quantity: *stock,
        image_url: String::new(),
        created_by: owner.id,
      })
      .await?;
  }

  info!(category_id = %category.id, products = DEMO_PRODUCTS.len(), "Demo catalog seeded.");
  Ok(())
}
