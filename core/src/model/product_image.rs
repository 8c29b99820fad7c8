// storefront/src/model/product_image.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::check_url;
use crate::error::ValidationError;
use crate::repository::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct ProductImage {
  pub id: Uuid,
  #[serde(rename = "product")]
  pub product_id: Uuid,
  pub image_url: String,
  pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductImageDraft {
  #[serde(rename = "product")]
  pub product_id: Uuid,
  pub image_url: String,
}

impl Resource for ProductImage {
  type Draft = ProductImageDraft;
  const NAME: &'static str = "product image";

  fn id(&self) -> Uuid {
    self.id
  }

  fn created_at(&self) -> DateTime<Utc> {
    self.uploaded_at
  }

  fn validate(draft: &ProductImageDraft) -> Result<(), ValidationError> {
    check_url("image_url", &draft.image_url)
  }

  fn materialize(id: Uuid, draft: ProductImageDraft, now: DateTime<Utc>) -> Self {
    ProductImage {
      id,
      product_id: draft.product_id,
      image_url: draft.image_url,
      uploaded_at: now,
    }
  }

  fn apply(&mut self, draft: ProductImageDraft, now: DateTime<Utc>) {
    self.product_id = draft.product_id;
    self.image_url = draft.image_url;
    self.uploaded_at = now;
  }
}
