// storefront_app/src/db/repository.rs

use super::map_sqlx_error;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::query_builder::Separated;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::marker::PhantomData;
use storefront::{Repository, Resource, StoreError, StoreResult};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Table mapping of a [`Resource`].
///
/// `COLUMNS` lists every column except `id`, in the order `push_columns`
/// binds their values.
pub trait PgResource: Resource + for<'r> FromRow<'r, PgRow> + Unpin {
  const TABLE: &'static str;
  const COLUMNS: &'static [&'static str];
  /// Column that orders listings (oldest first).
  const CREATED_COLUMN: &'static str;

  fn push_columns(&self, values: &mut Separated<'_, '_, Postgres, &'static str>);
}

pub struct PgRepository<R> {
  pool: PgPool,
  _resource: PhantomData<fn() -> R>,
}

impl<R: PgResource> PgRepository<R> {
  pub fn new(pool: PgPool) -> Self {
    Self {
      pool,
      _resource: PhantomData,
    }
  }

  pub(crate) fn pool(&self) -> &PgPool {
    &self.pool
  }
}

impl<R> Clone for PgRepository<R> {
  fn clone(&self) -> Self {
    Self {
      pool: self.pool.clone(),
      _resource: PhantomData,
    }
  }
}

#[async_trait]
impl<R: PgResource> Repository<R> for PgRepository<R> {
  #[instrument(name = "PgRepository::create", skip_all, fields(table = R::TABLE), err(Display))]
  async fn create(&self, draft: R::Draft) -> StoreResult<R> {
    R::validate_create(&draft)?;
    let record = R::materialize(Uuid::new_v4(), draft, Utc::now());

    let mut qb = QueryBuilder::<Postgres>::new(format!("INSERT INTO {} (id, {}) VALUES (", R::TABLE, R::COLUMNS.join(", ")));
    {
      let mut values = qb.separated(", ");
      values.push_bind(record.id());
      record.push_columns(&mut values);
    }
    qb.push(") RETURNING *");

    let created = qb
      .build_query_as::<R>()
      .fetch_one(&self.pool)
      .await
      .map_err(|e| map_sqlx_error(R::NAME, e))?;
    debug!(id = %created.id(), "Row inserted.");
    Ok(created)
  }

  async fn get(&self, id: Uuid) -> StoreResult<R> {
    let sql = format!("SELECT * FROM {} WHERE id = $1", R::TABLE);
    sqlx::query_as::<_, R>(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| map_sqlx_error(R::NAME, e))?
      .ok_or_else(|| StoreError::not_found(R::NAME, id))
  }

  async fn list(&self) -> StoreResult<Vec<R>> {
    let sql = format!("SELECT * FROM {} ORDER BY {}, id", R::TABLE, R::CREATED_COLUMN);
    sqlx::query_as::<_, R>(&sql)
      .fetch_all(&self.pool)
      .await
      .map_err(|e| map_sqlx_error(R::NAME, e))
  }

  /// Reads the row `FOR UPDATE`, applies the draft in Rust and writes every
  /// column back inside one transaction.
  #[instrument(name = "PgRepository::update", skip(self, draft), fields(table = R::TABLE), err(Display))]
  async fn update(&self, id: Uuid, draft: R::Draft) -> StoreResult<R> {
    R::validate(&draft)?;
    let map_err = |e| map_sqlx_error(R::NAME, e);

    let mut tx = self.pool.begin().await.map_err(map_err)?;
    let select = format!("SELECT * FROM {} WHERE id = $1 FOR UPDATE", R::TABLE);
    let mut record = sqlx::query_as::<_, R>(&select)
      .bind(id)
      .fetch_optional(&mut *tx)
      .await
      .map_err(map_err)?
      .ok_or_else(|| StoreError::not_found(R::NAME, id))?;
    record.apply(draft, Utc::now());

    let mut qb = QueryBuilder::<Postgres>::new(format!("UPDATE {} SET ({}) = ROW(", R::TABLE, R::COLUMNS.join(", ")));
    {
      let mut values = qb.separated(", ");
      record.push_columns(&mut values);
    }
    qb.push(") WHERE id = ");
    qb.push_bind(id);
    qb.push(" RETURNING *");

    let updated = qb.build_query_as::<R>().fetch_one(&mut *tx).await.map_err(map_err)?;
    tx.commit().await.map_err(map_err)?;
    debug!("Row updated.");
    Ok(updated)
  }

  #[instrument(name = "PgRepository::delete", skip(self), fields(table = R::TABLE), err(Display))]
  async fn delete(&self, id: Uuid) -> StoreResult<()> {
    let sql = format!("DELETE FROM {} WHERE id = $1", R::TABLE);
    let result = sqlx::query(&sql)
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(|e| map_sqlx_error(R::NAME, e))?;
    if result.rows_affected() == 0 {
      return Err(StoreError::not_found(R::NAME, id));
    }
    Ok(())
  }
}
