// storefront/src/repository/memory.rs

use super::{Repository, Resource};
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Process-local repository. Each record sits behind its own mutex, so work on
/// one row (e.g. a stock reservation) never blocks work on another.
///
/// Lock order is always table, then row.
pub struct InMemoryRepository<R: Resource> {
  rows: RwLock<HashMap<Uuid, Arc<Mutex<R>>>>,
}

impl<R: Resource> InMemoryRepository<R> {
  pub fn new() -> Self {
    Self {
      rows: RwLock::new(HashMap::new()),
    }
  }

  pub fn len(&self) -> usize {
    self.rows.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.read().is_empty()
  }

  /// Shared handle to one row. The table lock is released before returning.
  pub(crate) fn row(&self, id: Uuid) -> Option<Arc<Mutex<R>>> {
    self.rows.read().get(&id).cloned()
  }

  fn check_unique(rows: &HashMap<Uuid, Arc<Mutex<R>>>, candidate: &R) -> StoreResult<()> {
    let wanted = candidate.unique_keys();
    if wanted.is_empty() {
      return Ok(());
    }
    for (id, row) in rows.iter() {
      if *id == candidate.id() {
        continue;
      }
      let existing = row.lock().unique_keys();
      if let Some((field, value)) = wanted.iter().find(|key| existing.contains(key)) {
        return Err(StoreError::Conflict(format!(
          "{} with {} '{}' already exists",
          R::NAME,
          field,
          value
        )));
      }
    }
    Ok(())
  }
}

impl<R: Resource> Default for InMemoryRepository<R> {
  fn default() -> Self {
    Self::new()
  }
}

impl<R: Resource> std::fmt::Debug for InMemoryRepository<R> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("InMemoryRepository")
      .field("resource", &R::NAME)
      .field("rows", &self.len())
      .finish()
  }
}

#[async_trait]
impl<R: Resource> Repository<R> for InMemoryRepository<R> {
  #[instrument(name = "InMemoryRepository::create", skip_all, fields(resource = R::NAME), err(Display))]
  async fn create(&self, draft: R::Draft) -> StoreResult<R> {
    R::validate_create(&draft)?;
    let record = R::materialize(Uuid::new_v4(), draft, Utc::now());

    let mut rows = self.rows.write();
    Self::check_unique(&rows, &record)?;
    rows.insert(record.id(), Arc::new(Mutex::new(record.clone())));
    debug!(id = %record.id(), "Record created.");
    Ok(record)
  }

  async fn get(&self, id: Uuid) -> StoreResult<R> {
    let row = self.row(id).ok_or_else(|| StoreError::not_found(R::NAME, id))?;
    let record = row.lock().clone();
    Ok(record)
  }

  async fn list(&self) -> StoreResult<Vec<R>> {
    let handles: Vec<_> = self.rows.read().values().cloned().collect();
    let mut records: Vec<R> = handles.iter().map(|row| row.lock().clone()).collect();
    records.sort_by_key(|r| (r.created_at(), r.id()));
    Ok(records)
  }

  #[instrument(name = "InMemoryRepository::update", skip(self, draft), fields(resource = R::NAME), err(Display))]
  async fn update(&self, id: Uuid, draft: R::Draft) -> StoreResult<R> {
    R::validate(&draft)?;

    let rows = self.rows.write();
    let row = rows.get(&id).ok_or_else(|| StoreError::not_found(R::NAME, id))?;
    let mut candidate = row.lock().clone();
    candidate.apply(draft, Utc::now());
    Self::check_unique(&rows, &candidate)?;
    *row.lock() = candidate.clone();
    debug!("Record updated.");
    Ok(candidate)
  }

  #[instrument(name = "InMemoryRepository::delete", skip(self), fields(resource = R::NAME), err(Display))]
  async fn delete(&self, id: Uuid) -> StoreResult<()> {
    match self.rows.write().remove(&id) {
      Some(_) => Ok(()),
      None => Err(StoreError::not_found(R::NAME, id)),
    }
  }
}
