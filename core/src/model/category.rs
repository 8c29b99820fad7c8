// storefront/src/model/category.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::check_length;
use crate::error::ValidationError;
use crate::repository::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Category {
  pub id: Uuid,
  pub name: String,
  pub description: Option<String>,
  /// URL-friendly name, unique across categories.
  pub slug: String,
  pub created_date: DateTime<Utc>,
  pub updated_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDraft {
  pub name: String,
  #[serde(default)]
  pub description: Option<String>,
  pub slug: String,
}

impl Resource for Category {
  type Draft = CategoryDraft;
  const NAME: &'static str = "category";

  fn id(&self) -> Uuid {
    self.id
  }

  fn created_at(&self) -> DateTime<Utc> {
    self.created_date
  }

  fn validate(draft: &CategoryDraft) -> Result<(), ValidationError> {
    check_length("name", draft.name.trim(), 1, 255)?;
    check_length("slug", &draft.slug, 1, 50)?;
    let valid_slug = draft
      .slug
      .chars()
      .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if !valid_slug {
      return Err(ValidationError::new(
        "slug",
        "may only contain lowercase letters, digits, hyphens and underscores",
      ));
    }
    Ok(())
  }

  fn materialize(id: Uuid, draft: CategoryDraft, now: DateTime<Utc>) -> Self {
    Category {
      id,
      name: draft.name.trim().to_string(),
      description: draft.description,
      slug: draft.slug,
      created_date: now,
      updated_date: now,
    }
  }

  fn apply(&mut self, draft: CategoryDraft, now: DateTime<Utc>) {
    self.name = draft.name.trim().to_string();
    self.description = draft.description;
    self.slug = draft.slug;
    self.updated_date = now;
  }

  fn unique_keys(&self) -> Vec<(&'static str, String)> {
    vec![("name", self.name.clone()), ("slug", self.slug.clone())]
  }
}
