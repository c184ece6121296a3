//! The `GroceryStore` trait.
//!
//! Implemented by storage backends (e.g. `pantry-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  item::{GroceryItem, NewGroceryItem},
  listing::ListingFilter,
};

/// Abstraction over a grocery inventory backend.
///
/// Items are never deleted. The only mutation after insertion is the one-way
/// consume transition.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait GroceryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new, unconsumed item and return it with its assigned `id` and
  /// `created_at`.
  fn add(
    &self,
    item: NewGroceryItem,
  ) -> impl Future<Output = Result<GroceryItem, Self::Error>> + Send + '_;

  /// Mark the item with `id` as consumed.
  ///
  /// Returns the number of rows affected: `0` if no such item exists, `1`
  /// otherwise, including when the item was already consumed. The first
  /// `consumed_at` timestamp is kept.
  fn consume(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Return the items matching `filter`, in the order given by
  /// [`ListingFilter::order`].
  fn list<'a>(
    &'a self,
    filter: &'a ListingFilter,
  ) -> impl Future<Output = Result<Vec<GroceryItem>, Self::Error>> + Send + 'a;
}
