// storefront/src/model/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::check_length;
use crate::error::ValidationError;
use crate::repository::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct User {
  pub id: Uuid,
  pub username: String,
  pub email: String,
  #[serde(skip_serializing)] // Never send password hash to client
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// The password is already hashed by the time a draft exists. A replace
/// without a hash keeps the stored one; a create must carry one.
#[derive(Debug, Clone)]
pub struct UserDraft {
  pub username: String,
  pub email: String,
  pub password_hash: Option<String>,
}

impl Resource for User {
  type Draft = UserDraft;
  const NAME: &'static str = "user";

  fn id(&self) -> Uuid {
    self.id
  }

  fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  fn validate(draft: &UserDraft) -> Result<(), ValidationError> {
    check_length("username", draft.username.trim(), 1, 150)?;
    check_length("email", &draft.email, 3, 254)?;
    match draft.email.split_once('@') {
      Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
      _ => return Err(ValidationError::new("email", "Enter a valid email address.")),
    }
    if draft.password_hash.as_deref() == Some("") {
      return Err(ValidationError::new("password", "Password cannot be empty."));
    }
    Ok(())
  }

  fn validate_create(draft: &UserDraft) -> Result<(), ValidationError> {
    if draft.password_hash.is_none() {
      return Err(ValidationError::new("password", "This field is required."));
    }
    Self::validate(draft)
  }

  fn materialize(id: Uuid, draft: UserDraft, now: DateTime<Utc>) -> Self {
    User {
      id,
      username: draft.username.trim().to_string(),
      email: draft.email,
      password_hash: draft.password_hash.unwrap_or_default(),
      created_at: now,
      updated_at: now,
    }
  }

  fn apply(&mut self, draft: UserDraft, now: DateTime<Utc>) {
    self.username = draft.username.trim().to_string();
    self.email = draft.email;
    if let Some(hash) = draft.password_hash {
      self.password_hash = hash;
    }
    self.updated_at = now;
  }

  fn unique_keys(&self) -> Vec<(&'static str, String)> {
    vec![("username", self.username.clone())]
  }
}
