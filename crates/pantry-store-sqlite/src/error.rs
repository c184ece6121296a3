//! Error type for `pantry-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("connection pool is closed")]
  PoolClosed,

  #[error("connection pool size must be at least 1")]
  EmptyPool,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
