//! JSON REST API for Pantry.
//!
//! Exposes an axum [`Router`] backed by any [`pantry_core::GroceryStore`].
//! Static assets, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", pantry_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod groceries;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use pantry_core::GroceryStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: GroceryStore + 'static,
{
  Router::new()
    .route("/groceries", get(groceries::list::<S>))
    .route("/grocery", post(groceries::create::<S>))
    .route("/grocery/consume/{item_id}", post(groceries::consume::<S>))
    .with_state(store)
}
