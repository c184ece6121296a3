//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD`. Timestamps are UTC and stored as
//! `YYYY-MM-DD HH:MM:SS.fff`, the same shape SQLite's own
//! `strftime('%Y-%m-%d %H:%M:%f', 'now')` produces, so stored values and
//! bound range parameters compare correctly as text.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use pantry_core::GroceryItem;

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Timestamps ──────────────────────────────────────────────────────────────

pub fn encode_ts(ts: NaiveDateTime) -> String {
  ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn encode_dt(dt: DateTime<Utc>) -> String { encode_ts(dt.naive_utc()) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  NaiveDateTime::parse_from_str(s, TIMESTAMP_PARSE_FORMAT)
    .map(|ts| ts.and_utc())
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Raw row ─────────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawItem::from_row`].
pub const ITEM_COLUMNS: &str =
  "id, name, tags, expiry_date, image_base64, consumed, consumed_at, created_at";

/// A `groceries` row with its text columns still undecoded.
pub struct RawItem {
  pub id:           i64,
  pub name:         Option<String>,
  pub tags:         String,
  pub expiry_date:  Option<String>,
  pub image_base64: String,
  pub consumed:     bool,
  pub consumed_at:  Option<String>,
  pub created_at:   String,
}

impl RawItem {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      name:         row.get(1)?,
      tags:         row.get(2)?,
      expiry_date:  row.get(3)?,
      image_base64: row.get(4)?,
      consumed:     row.get(5)?,
      consumed_at:  row.get(6)?,
      created_at:   row.get(7)?,
    })
  }

  pub fn into_item(self) -> Result<GroceryItem> {
    Ok(GroceryItem {
      id:           self.id,
      name:         self.name,
      tags:         self.tags,
      expiry_date:  self.expiry_date.as_deref().map(decode_date).transpose()?,
      image_base64: self.image_base64,
      consumed:     self.consumed,
      consumed_at:  self.consumed_at.as_deref().map(decode_dt).transpose()?,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}
