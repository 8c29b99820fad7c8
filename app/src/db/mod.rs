// storefront_app/src/db/mod.rs

//! PostgreSQL implementations of the storefront store traits.
//!
//! One generic [`PgRepository<R>`] serves every catalog resource; the product
//! table additionally acts as the catalog and the inventory ledger, and
//! [`PgOrderStore`] keeps orders with their lines.

pub mod inventory;
pub mod orders;
pub mod repository;
pub mod resources;
pub mod seed;

#[cfg(test)]
mod tests;

pub use orders::PgOrderStore;
pub use repository::{PgRepository, PgResource};

use sqlx::error::ErrorKind;
use storefront::{StoreError, ValidationError};

/// Maps a sqlx failure to the storage error the core understands.
///
/// Constraint violations are client mistakes (duplicate unique value, dangling
/// reference, out-of-range value); everything else is an opaque backend failure.
pub fn map_sqlx_error(resource: &'static str, err: sqlx::Error) -> StoreError {
  if let sqlx::Error::Database(db_err) = &err {
    let constraint = db_err.constraint().unwrap_or("unknown").to_string();
    match db_err.kind() {
      ErrorKind::UniqueViolation => {
        return StoreError::Conflict(format!("{} violates unique constraint '{}'", resource, constraint));
      }
      ErrorKind::ForeignKeyViolation => {
        // Deletes of a still-referenced row report the same kind as dangling inserts.
        let message = if db_err.message().starts_with("update or delete on table") {
          format!("{} is still referenced by other records.", resource)
        } else {
          format!("{} refers to a record that does not exist.", resource)
        };
        return StoreError::Validation(ValidationError::new(constraint, message));
      }
      ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
        return StoreError::Validation(ValidationError::new(constraint, db_err.message().to_string()));
      }
      _ => {}
    }
  }
  tracing::error!(resource, error = %err, "Database operation failed.");
  StoreError::backend(err)
}
