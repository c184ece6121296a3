//! A fixed-size pool of [`tokio_rusqlite::Connection`]s.
//!
//! Every store operation takes a [`PooledConnection`] for its duration. The
//! guard puts the connection back when dropped, so it is released on every
//! exit path, including `?` returns and panics inside the operation.

use std::{
  ops::Deref,
  path::Path,
  sync::{Arc, Mutex, PoisonError},
  time::Duration,
};

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_rusqlite::Connection;

use crate::{Error, Result};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// ─── Pool ────────────────────────────────────────────────────────────────────

/// Cloning is cheap; clones share the same connections.
#[derive(Clone)]
pub struct ConnectionPool {
  idle:    Arc<Mutex<Vec<Connection>>>,
  permits: Arc<Semaphore>,
  size:    usize,
}

impl ConnectionPool {
  /// Open `size` connections to the database file at `path`.
  pub async fn open(path: impl AsRef<Path>, size: usize) -> Result<Self> {
    if size == 0 {
      return Err(Error::EmptyPool);
    }
    let path = path.as_ref();
    let mut conns = Vec::with_capacity(size);
    for _ in 0..size {
      conns.push(configure(Connection::open(path).await?).await?);
    }
    Ok(Self::from_connections(conns))
  }

  /// A single-connection pool over a private in-memory database.
  ///
  /// SQLite in-memory databases are per-connection, so this pool never holds
  /// more than one.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = configure(Connection::open_in_memory().await?).await?;
    Ok(Self::from_connections(vec![conn]))
  }

  fn from_connections(conns: Vec<Connection>) -> Self {
    let size = conns.len();
    Self {
      idle: Arc::new(Mutex::new(conns)),
      permits: Arc::new(Semaphore::new(size)),
      size,
    }
  }

  pub fn size(&self) -> usize { self.size }

  /// Connections not currently checked out.
  pub fn idle(&self) -> usize { self.permits.available_permits() }

  /// Wait for a free connection.
  pub async fn acquire(&self) -> Result<PooledConnection> {
    let permit = Arc::clone(&self.permits)
      .acquire_owned()
      .await
      .map_err(|_| Error::PoolClosed)?;

    // Holding a permit guarantees an idle connection is present.
    let conn = self
      .idle
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .pop()
      .ok_or(Error::PoolClosed)?;

    Ok(PooledConnection {
      conn:    Some(conn),
      idle:    Arc::clone(&self.idle),
      _permit: permit,
    })
  }

  /// Stop handing out connections. Operations already holding one finish
  /// normally; later `acquire` calls fail with [`Error::PoolClosed`].
  pub fn close(&self) { self.permits.close(); }
}

async fn configure(conn: Connection) -> Result<Connection> {
  conn
    .call(|conn| {
      conn.busy_timeout(BUSY_TIMEOUT)?;
      Ok(())
    })
    .await?;
  Ok(conn)
}

// ─── Guard ───────────────────────────────────────────────────────────────────

/// A checked-out connection. Returned to the pool on drop.
pub struct PooledConnection {
  conn:    Option<Connection>,
  idle:    Arc<Mutex<Vec<Connection>>>,
  // Dropped after `Drop::drop` has pushed the connection back.
  _permit: OwnedSemaphorePermit,
}

impl Deref for PooledConnection {
  type Target = Connection;

  fn deref(&self) -> &Connection {
    // Only `Drop` takes the connection out.
    self.conn.as_ref().expect("pooled connection already released")
  }
}

impl Drop for PooledConnection {
  fn drop(&mut self) {
    if let Some(conn) = self.conn.take() {
      self
        .idle
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(conn);
    }
  }
}
