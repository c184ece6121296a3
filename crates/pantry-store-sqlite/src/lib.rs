//! SQLite backend for the Pantry grocery store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on dedicated threads
//! without blocking the async runtime. Connections are handed out per
//! operation by a small [`ConnectionPool`].

mod encode;
mod listing;
mod pool;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use pool::{ConnectionPool, PooledConnection};
pub use store::{SqliteStore, StoreConfig};
