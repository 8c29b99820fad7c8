// storefront/src/model/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::check_length;
use crate::error::ValidationError;
use crate::repository::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Review {
  pub id: Uuid,
  #[serde(rename = "product")]
  pub product_id: Uuid,
  #[serde(rename = "user")]
  pub user_id: Uuid,
  pub rating: i32,
  pub review_content: String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ReviewDraft {
  pub product_id: Uuid,
  pub user_id: Uuid,
  pub rating: i32,
  pub review_content: String,
}

impl Resource for Review {
  type Draft = ReviewDraft;
  const NAME: &'static str = "review";

  fn id(&self) -> Uuid {
    self.id
  }

  fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  fn validate(draft: &ReviewDraft) -> Result<(), ValidationError> {
    if !(1..=5).contains(&draft.rating) {
      return Err(ValidationError::new("rating", "Rating must be between 1 and 5."));
    }
    check_length("review_content", &draft.review_content, 0, 5000)
  }

  fn materialize(id: Uuid, draft: ReviewDraft, now: DateTime<Utc>) -> Self {
    Review {
      id,
      product_id: draft.product_id,
      user_id: draft.user_id,
      rating: draft.rating,
      review_content: draft.review_content,
      created_at: now,
    }
  }

  // The reviewer and the creation time never change.
  fn apply(&mut self, draft: ReviewDraft, _now: DateTime<Utc>) {
    self.product_id = draft.product_id;
    self.rating = draft.rating;
    self.review_content = draft.review_content;
  }
}
