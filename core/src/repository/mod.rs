// storefront/src/repository/mod.rs

//! One CRUD abstraction for every catalog resource.
//!
//! A type describes itself through [`Resource`] (its draft input, validation
//! and uniqueness rules) and any backend that implements [`Repository<R>`]
//! serves it. Categories, products, reviews, product images and users all go
//! through the same code paths; only orders have a bespoke store, because they
//! are created by the placement workflow.

pub mod memory;

pub use memory::InMemoryRepository;

use crate::error::{StoreResult, ValidationError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A persisted entity with a validated create/replace input.
pub trait Resource: Clone + Send + Sync + 'static {
  /// Input for create and full replace.
  type Draft: Send + Sync + 'static;

  /// Human-readable resource name used in errors and logs.
  const NAME: &'static str;

  fn id(&self) -> Uuid;

  /// Listing order: oldest first.
  fn created_at(&self) -> DateTime<Utc>;

  fn validate(draft: &Self::Draft) -> Result<(), ValidationError>;

  /// Extra rules for a draft that creates a record rather than replacing one.
  fn validate_create(draft: &Self::Draft) -> Result<(), ValidationError> {
    Self::validate(draft)
  }

  /// Builds a new record from a validated draft.
  fn materialize(id: Uuid, draft: Self::Draft, now: DateTime<Utc>) -> Self;

  /// Replaces the mutable fields of an existing record with a validated draft.
  fn apply(&mut self, draft: Self::Draft, now: DateTime<Utc>);

  /// `(field, value)` pairs that must be unique across all records of this type.
  fn unique_keys(&self) -> Vec<(&'static str, String)> {
    Vec::new()
  }
}

#[async_trait]
pub trait Repository<R: Resource>: Send + Sync {
  async fn create(&self, draft: R::Draft) -> StoreResult<R>;

  async fn get(&self, id: Uuid) -> StoreResult<R>;

  async fn list(&self) -> StoreResult<Vec<R>>;

  /// Full replace of the record's mutable fields.
  async fn update(&self, id: Uuid, draft: R::Draft) -> StoreResult<R>;

  async fn delete(&self, id: Uuid) -> StoreResult<()>;
}
