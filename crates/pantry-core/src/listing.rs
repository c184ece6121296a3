//! Listing parameters and their resolution into a concrete filter.
//!
//! [`ListingRequest`] holds the raw query parameters as received.
//! [`ListingRequest::resolve`] turns them into a [`ListingFilter`] that a
//! store can execute, or `None` when the request cannot match anything.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::relative::parse_relative_offset;

// ─── Raw request ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ListingRequest {
  pub tag:           Option<String>,
  pub subtag:        Option<String>,
  /// List consumed items instead of items still in stock.
  pub show_consumed: bool,
  /// Relative offset (e.g. `"7d"`) for the start of the consumed range.
  pub from_date:     Option<String>,
  /// Relative offset for the end of the consumed range. Defaults to today.
  pub to_date:       Option<String>,
}

impl ListingRequest {
  pub fn new(tag: impl Into<String>, subtag: impl Into<String>) -> Self {
    Self {
      tag: Some(tag.into()),
      subtag: Some(subtag.into()),
      ..Self::default()
    }
  }

  pub fn consumed(mut self, from_date: Option<&str>, to_date: Option<&str>) -> Self {
    self.show_consumed = true;
    self.from_date = from_date.map(str::to_owned);
    self.to_date = to_date.map(str::to_owned);
    self
  }

  /// Resolve relative dates against `today` and build the filter.
  ///
  /// Returns `None` if `tag` or `subtag` is missing or empty. An
  /// unparseable `from_date` drops the date range entirely; an unparseable
  /// `to_date` falls back to `today`.
  pub fn resolve(&self, today: NaiveDate) -> Option<ListingFilter> {
    let tag = self.tag.as_deref().filter(|t| !t.is_empty())?;
    let subtag = self.subtag.as_deref().filter(|s| !s.is_empty())?;

    let consumed_between = if self.show_consumed {
      consumed_range(self.from_date.as_deref(), self.to_date.as_deref(), today)
    } else {
      None
    };

    Some(ListingFilter {
      tags: compose_tags(tag, subtag),
      consumed: self.show_consumed,
      consumed_between,
    })
  }
}

fn consumed_range(
  from_date: Option<&str>,
  to_date: Option<&str>,
  today: NaiveDate,
) -> Option<ConsumedRange> {
  let start = parse_relative_offset(from_date, today)?;
  let end = to_date
    .filter(|s| !s.is_empty())
    .and_then(|s| parse_relative_offset(Some(s), today))
    .unwrap_or(today);

  Some(ConsumedRange {
    start: start.and_time(NaiveTime::MIN),
    end:   end.and_time(END_OF_DAY),
  })
}

/// Last millisecond of a day; the inclusive upper bound of a range.
pub const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_milli_opt(23, 59, 59, 999) {
  Some(t) => t,
  None => panic!("23:59:59.999 is a valid time"),
};

/// The stored form of a tag pair.
pub fn compose_tags(tag: &str, subtag: &str) -> String { format!("{tag},{subtag}") }

// ─── Resolved filter ─────────────────────────────────────────────────────────

/// Inclusive bounds on `consumed_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumedRange {
  pub start: NaiveDateTime,
  pub end:   NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingOrder {
  /// Most recently consumed first.
  ConsumedAtDesc,
  /// Soonest expiry first; items without an expiry date last.
  ExpiryAscNullsLast,
}

/// A fully-resolved listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFilter {
  /// Exact composite tag string to match.
  pub tags:             String,
  pub consumed:         bool,
  pub consumed_between: Option<ConsumedRange>,
}

impl ListingFilter {
  pub fn order(&self) -> ListingOrder {
    if self.consumed {
      ListingOrder::ConsumedAtDesc
    } else {
      ListingOrder::ExpiryAscNullsLast
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn jan_10() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 1, 10).unwrap() }

  fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
      .unwrap()
      .and_hms_milli_opt(h, mi, s, ms)
      .unwrap()
  }

  #[test]
  fn missing_subtag_short_circuits() {
    let req = ListingRequest {
      tag: Some("dairy".into()),
      from_date: Some("7d".into()),
      show_consumed: true,
      ..ListingRequest::default()
    };
    assert_eq!(req.resolve(jan_10()), None);
  }

  #[test]
  fn empty_tag_short_circuits() {
    assert_eq!(ListingRequest::new("", "milk").resolve(jan_10()), None);
    assert_eq!(ListingRequest::new("dairy", "").resolve(jan_10()), None);
    assert_eq!(ListingRequest::default().resolve(jan_10()), None);
  }

  #[test]
  fn unconsumed_listing_has_no_range() {
    let mut req = ListingRequest::new("dairy", "milk");
    req.from_date = Some("7d".into());
    let filter = req.resolve(jan_10()).unwrap();
    assert_eq!(filter.tags, "dairy,milk");
    assert!(!filter.consumed);
    assert_eq!(filter.consumed_between, None);
    assert_eq!(filter.order(), ListingOrder::ExpiryAscNullsLast);
  }

  #[test]
  fn consumed_range_defaults_end_to_today() {
    let filter = ListingRequest::new("dairy", "milk")
      .consumed(Some("7d"), None)
      .resolve(jan_10())
      .unwrap();
    assert!(filter.consumed);
    assert_eq!(filter.order(), ListingOrder::ConsumedAtDesc);
    assert_eq!(
      filter.consumed_between,
      Some(ConsumedRange {
        start: at(2024, 1, 3, 0, 0, 0, 0),
        end:   at(2024, 1, 10, 23, 59, 59, 999),
      })
    );
  }

  #[test]
  fn consumed_range_with_explicit_end() {
    let filter = ListingRequest::new("dairy", "milk")
      .consumed(Some("2w"), Some("1w"))
      .resolve(jan_10())
      .unwrap();
    assert_eq!(
      filter.consumed_between,
      Some(ConsumedRange {
        start: at(2023, 12, 27, 0, 0, 0, 0),
        end:   at(2024, 1, 3, 23, 59, 59, 999),
      })
    );
  }

  #[test]
  fn unparseable_start_drops_range() {
    let filter = ListingRequest::new("dairy", "milk")
      .consumed(Some("soon"), Some("1d"))
      .resolve(jan_10())
      .unwrap();
    assert_eq!(filter.consumed_between, None);

    let filter = ListingRequest::new("dairy", "milk")
      .consumed(None, Some("1d"))
      .resolve(jan_10())
      .unwrap();
    assert_eq!(filter.consumed_between, None);
  }

  #[test]
  fn unparseable_end_falls_back_to_today() {
    let filter = ListingRequest::new("dairy", "milk")
      .consumed(Some("1d"), Some("later"))
      .resolve(jan_10())
      .unwrap();
    assert_eq!(
      filter.consumed_between.map(|r| r.end),
      Some(at(2024, 1, 10, 23, 59, 59, 999))
    );
  }

  #[test]
  fn end_of_day_is_the_last_millisecond() {
    assert_eq!(END_OF_DAY, NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap());
    let filter = ListingRequest::new("dairy", "milk")
      .consumed(Some("0d"), Some("0d"))
      .resolve(jan_10())
      .unwrap();
    let range = filter.consumed_between.unwrap();
    assert!(range.end > at(2024, 1, 10, 23, 59, 59, 998));
    assert_eq!(range.end.date(), range.start.date());
  }

  #[test]
  fn tags_are_not_trimmed_or_split() {
    let filter = ListingRequest::new(" dairy", "milk,whole")
      .resolve(jan_10())
      .unwrap();
    assert_eq!(filter.tags, " dairy,milk,whole");
  }
}
