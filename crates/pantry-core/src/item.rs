//! The grocery item record and its insertion payload.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One inventory record, as stored and as returned by the API.
///
/// `consumed_at` is `None` exactly when `consumed` is `false`. Items are
/// never deleted; the only mutation is the one-way consume transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryItem {
  pub id:           i64,
  pub name:         Option<String>,
  /// Composite `"{tag},{subtag}"` string, matched as a whole.
  pub tags:         String,
  pub expiry_date:  Option<NaiveDate>,
  pub image_base64: String,
  pub consumed:     bool,
  pub consumed_at:  Option<DateTime<Utc>>,
  pub created_at:   DateTime<Utc>,
}

/// Caller-supplied fields for a new item. Everything else is assigned by the
/// store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGroceryItem {
  #[serde(default)]
  pub name:         Option<String>,
  pub tags:         String,
  #[serde(default)]
  pub expiry_date:  Option<NaiveDate>,
  pub image_base64: String,
}

impl NewGroceryItem {
  pub fn new(tags: impl Into<String>, image_base64: impl Into<String>) -> Self {
    Self {
      name:         None,
      tags:         tags.into(),
      expiry_date:  None,
      image_base64: image_base64.into(),
    }
  }

  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  pub fn with_expiry(mut self, expiry_date: NaiveDate) -> Self {
    self.expiry_date = Some(expiry_date);
    self
  }
}
