//! [`SqliteStore`] — the SQLite implementation of [`GroceryStore`].

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use pantry_core::{GroceryItem, GroceryStore, ListingFilter, NewGroceryItem};

use crate::{
  Result,
  encode::{ITEM_COLUMNS, RawItem, encode_date, encode_dt},
  listing::listing_sql,
  pool::ConnectionPool,
  schema::SCHEMA,
};

// ─── Config ──────────────────────────────────────────────────────────────────

/// Where the database lives and how many connections to keep open.
#[derive(Debug, Clone)]
pub struct StoreConfig {
  pub path:      PathBuf,
  pub pool_size: usize,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A grocery store backed by a single SQLite file.
///
/// Cloning is cheap — clones share the connection pool.
#[derive(Clone)]
pub struct SqliteStore {
  pool: ConnectionPool,
}

impl SqliteStore {
  /// Open (or create) the database described by `config` and ensure the
  /// schema exists.
  pub async fn open(config: &StoreConfig) -> Result<Self> {
    let pool = ConnectionPool::open(&config.path, config.pool_size).await?;
    let store = Self { pool };
    store.init_schema().await?;
    tracing::debug!(
      path = %config.path.display(),
      pool_size = config.pool_size,
      "opened sqlite store"
    );
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let pool = ConnectionPool::open_in_memory().await?;
    let store = Self { pool };
    store.init_schema().await?;
    Ok(store)
  }

  pub fn pool(&self) -> &ConnectionPool { &self.pool }

  async fn init_schema(&self) -> Result<()> {
    let conn = self.pool.acquire().await?;
    conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Mark `id` as consumed at `at`. An item that is already consumed keeps
  /// its original `consumed_at`.
  pub async fn consume_at(&self, id: i64, at: DateTime<Utc>) -> Result<usize> {
    let at_str = encode_dt(at);

    let conn = self.pool.acquire().await?;
    let changes = conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE groceries
             SET consumed = 1, consumed_at = COALESCE(consumed_at, ?1)
           WHERE id = ?2",
          rusqlite::params![at_str, id],
        )?)
      })
      .await?;

    Ok(changes)
  }
}

// ─── GroceryStore impl ───────────────────────────────────────────────────────

impl GroceryStore for SqliteStore {
  type Error = crate::Error;

  async fn add(&self, item: NewGroceryItem) -> Result<GroceryItem> {
    let expiry_str = item.expiry_date.map(encode_date);
    let NewGroceryItem { name, tags, image_base64, .. } = item;

    let conn = self.pool.acquire().await?;
    let raw: RawItem = conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "INSERT INTO groceries (name, tags, expiry_date, image_base64)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {ITEM_COLUMNS}"
          ),
          rusqlite::params![name, tags, expiry_str, image_base64],
          RawItem::from_row,
        )?)
      })
      .await?;

    raw.into_item()
  }

  async fn consume(&self, id: i64) -> Result<usize> {
    self.consume_at(id, Utc::now()).await
  }

  async fn list(&self, filter: &ListingFilter) -> Result<Vec<GroceryItem>> {
    let (sql, params) = listing_sql(filter);

    let conn = self.pool.acquire().await?;
    let raws: Vec<RawItem> = conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawItem::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawItem::into_item).collect()
  }
}
