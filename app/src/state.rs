// storefront_app/src/state.rs

use crate::config::AppConfig;
use crate::db::{PgOrderStore, PgRepository};
use sqlx::PgPool;
use std::sync::Arc;
use storefront::model::{Category, Product, ProductImage, Review, User};
use storefront::{InMemoryOrderStore, InMemoryRepository, OrderPlacement, Repository};

/// Shared by every request handler. Cloning is cheap (all `Arc`s).
#[derive(Clone)]
pub struct AppState {
  pub categories: Arc<dyn Repository<Category>>,
  pub products: Arc<dyn Repository<Product>>,
  pub reviews: Arc<dyn Repository<Review>>,
  pub product_images: Arc<dyn Repository<ProductImage>>,
  pub users: Arc<dyn Repository<User>>,
  pub placement: Arc<OrderPlacement>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  /// Everything in process memory. The product repository doubles as catalog
  /// and inventory ledger.
  pub fn in_memory(config: Arc<AppConfig>) -> Self {
    let products = Arc::new(InMemoryRepository::<Product>::new());
    let placement = OrderPlacement::new(products.clone(), products.clone(), Arc::new(InMemoryOrderStore::new()));
    Self {
      categories: Arc::new(InMemoryRepository::<Category>::new()),
      products,
      reviews: Arc::new(InMemoryRepository::<Review>::new()),
      product_images: Arc::new(InMemoryRepository::<ProductImage>::new()),
      users: Arc::new(InMemoryRepository::<User>::new()),
      placement: Arc::new(placement),
      config,
    }
  }

  pub fn postgres(pool: PgPool, config: Arc<AppConfig>) -> Self {
    let products = Arc::new(PgRepository::<Product>::new(pool.clone()));
    let placement = OrderPlacement::new(products.clone(), products.clone(), Arc::new(PgOrderStore::new(pool.clone())));
    Self {
      categories: Arc::new(PgRepository::<Category>::new(pool.clone())),
      products,
      reviews: Arc::new(PgRepository::<Review>::new(pool.clone())),
      product_images: Arc::new(PgRepository::<ProductImage>::new(pool.clone())),
      users: Arc::new(PgRepository::<User>::new(pool)),
      placement: Arc::new(placement),
      config,
    }
  }
}
