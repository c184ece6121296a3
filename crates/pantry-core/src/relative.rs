//! Relative date offsets such as `"7d"`, `"3w"` or `"1m"`.
//!
//! An offset is an integer followed by a one-letter unit and means "that many
//! units before today". Months are a flat 30 days, not calendar months.

use chrono::{NaiveDate, TimeDelta, Utc};

/// Resolve `input` to the calendar date that many units before `today`.
///
/// Returns `None` for anything that is not `<integer><unit>` with a unit of
/// `d`, `w` or `m` (case-insensitive). The integer is taken as parsed, so a
/// negative value yields a date after `today`.
pub fn parse_relative_offset(
  input: Option<&str>,
  today: NaiveDate,
) -> Option<NaiveDate> {
  let input = input?;
  let (unit_at, unit) = input.char_indices().next_back()?;
  if unit_at == 0 {
    return None;
  }

  let value: i64 = input[..unit_at].parse().ok()?;
  let days_per_unit = match unit.to_ascii_lowercase() {
    'd' => 1,
    'w' => 7,
    'm' => 30,
    _ => return None,
  };

  let delta = TimeDelta::try_days(value.checked_mul(days_per_unit)?)?;
  today.checked_sub_signed(delta)
}

/// The current calendar date in UTC, the reference point for offsets.
pub fn today() -> NaiveDate { Utc::now().date_naive() }
