// storefront_app/src/db/resources.rs

//! Table mappings for the catalog resources.

use super::PgResource;
use sqlx::query_builder::Separated;
use sqlx::Postgres;
use storefront::model::{Category, Product, ProductImage, Review, User};

impl PgResource for Category {
  const TABLE: &'static str = "categories";
  const COLUMNS: &'static [&'static str] = &["name", "description", "slug", "created_date", "updated_date"];
  const CREATED_COLUMN: &'static str = "created_date";

  fn push_columns(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
    values
      .push_bind(self.name.clone())
      .push_bind(self.description.clone())
      .push_bind(self.slug.clone())
      .push_bind(self.created_date)
      .push_bind(self.updated_date);
  }
}

impl PgResource for Product {
  const TABLE: &'static str = "products";
  const COLUMNS: &'static [&'static str] = &[
    "name",
    "description",
    "price",
    "category_id",
    "stock_quantity",
    "image_url",
    "created_by",
    "created_date",
    "updated_date",
  ];
  const CREATED_COLUMN: &'static str = "created_date";

  fn push_columns(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
    values
      .push_bind(self.name.clone())
      .push_bind(self.description.clone())
      .push_bind(self.price)
      .push_bind(self.category_id)
      .push_bind(self.stock_quantity)
      .push_bind(self.image_url.clone())
      .push_bind(self.created_by)
      .push_bind(self.created_date)
      .push_bind(self.updated_date);
  }
}

impl PgResource for Review {
  const TABLE: &'static str = "reviews";
  const COLUMNS: &'static [&'static str] = &["product_id", "user_id", "rating", "review_content", "created_at"];
  const CREATED_COLUMN: &'static str = "created_at";

  fn push_columns(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
    values
      .push_bind(self.product_id)
      .push_bind(self.user_id)
      .push_bind(self.rating)
      .push_bind(self.review_content.clone())
      .push_bind(self.created_at);
  }
}

impl PgResource for ProductImage {
  const TABLE: &'static str = "product_images";
  const COLUMNS: &'static [&'static str] = &["product_id", "image_url", "uploaded_at"];
  const CREATED_COLUMN: &'static str = "uploaded_at";

  fn push_columns(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
    values
      .push_bind(self.product_id)
      .push_bind(self.image_url.clone())
      .push_bind(self.uploaded_at);
  }
}

impl PgResource for User {
  const TABLE: &'static str = "users";
  const COLUMNS: &'static [&'static str] = &["username", "email", "password_hash", "created_at", "updated_at"];
  const CREATED_COLUMN: &'static str = "created_at";

  fn push_columns(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
    values
      .push_bind(self.username.clone())
      .push_bind(self.email.clone())
      .push_bind(self.password_hash.clone())
      .push_bind(self.created_at)
      .push_bind(self.updated_at);
  }
}
