//! Core types and trait definitions for the Pantry grocery tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

pub mod item;
pub mod listing;
pub mod relative;
pub mod store;

pub use item::{GroceryItem, NewGroceryItem};
pub use listing::{ConsumedRange, ListingFilter, ListingOrder, ListingRequest, compose_tags};
pub use relative::parse_relative_offset;
pub use store::GroceryStore;
