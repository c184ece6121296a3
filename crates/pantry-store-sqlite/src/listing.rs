//! SQL construction for [`ListingFilter`].

use pantry_core::{ListingFilter, ListingOrder};
use rusqlite::types::Value;

use crate::encode::{ITEM_COLUMNS, encode_ts};

/// Build the `SELECT` for `filter` and the values for its placeholders, in
/// placeholder order.
pub fn listing_sql(filter: &ListingFilter) -> (String, Vec<Value>) {
  let mut sql = format!(
    "SELECT {ITEM_COLUMNS} FROM groceries WHERE consumed = ?1 AND tags = ?2"
  );
  let mut params = vec![
    Value::Integer(i64::from(filter.consumed)),
    Value::Text(filter.tags.clone()),
  ];

  if let Some(range) = filter.consumed_between {
    sql.push_str(" AND consumed_at BETWEEN ?3 AND ?4");
    params.push(Value::Text(encode_ts(range.start)));
    params.push(Value::Text(encode_ts(range.end)));
  }

  sql.push_str(match filter.order() {
    ListingOrder::ConsumedAtDesc => " ORDER BY consumed_at DESC, id DESC",
    ListingOrder::ExpiryAscNullsLast => {
      " ORDER BY expiry_date IS NULL, expiry_date ASC, id ASC"
    }
  });

  (sql, params)
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use pantry_core::ListingRequest;

  use super::*;

  fn jan_10() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 1, 10).unwrap() }

  #[test]
  fn unconsumed_listing_sorts_by_expiry_nulls_last() {
    let filter = ListingRequest::new("dairy", "milk").resolve(jan_10()).unwrap();
    let (sql, params) = listing_sql(&filter);

    assert!(sql.contains("WHERE consumed = ?1 AND tags = ?2 ORDER BY"), "{sql}");
    assert!(!sql.contains("BETWEEN"), "{sql}");
    assert!(sql.ends_with("ORDER BY expiry_date IS NULL, expiry_date ASC, id ASC"));
    assert_eq!(params, vec![
      Value::Integer(0),
      Value::Text("dairy,milk".into()),
    ]);
  }

  #[test]
  fn consumed_listing_with_range() {
    let filter = ListingRequest::new("dairy", "milk")
      .consumed(Some("7d"), None)
      .resolve(jan_10())
      .unwrap();
    let (sql, params) = listing_sql(&filter);

    assert!(sql.contains("AND consumed_at BETWEEN ?3 AND ?4"), "{sql}");
    assert!(sql.ends_with("ORDER BY consumed_at DESC, id DESC"), "{sql}");
    assert_eq!(params, vec![
      Value::Integer(1),
      Value::Text("dairy,milk".into()),
      Value::Text("2024-01-03 00:00:00.000".into()),
      Value::Text("2024-01-10 23:59:59.999".into()),
    ]);
  }

  #[test]
  fn consumed_listing_without_range() {
    let filter = ListingRequest::new("dairy", "milk")
      .consumed(None, Some("1d"))
      .resolve(jan_10())
      .unwrap();
    let (sql, params) = listing_sql(&filter);

    assert!(!sql.contains("BETWEEN"), "{sql}");
    assert_eq!(params.len(), 2);
    assert_eq!(params[0], Value::Integer(1));
  }
}
