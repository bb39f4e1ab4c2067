//! Wall-clock helpers.
//!
//! All times are the device's local wall clock, carried as
//! [`NaiveDateTime`]. A schedule entry is only ever turned into an absolute
//! instant for the calendar day of the reference it is resolved against, so
//! the same entry resolves differently on either side of local midnight.

use chrono::{Local, NaiveDateTime, NaiveTime};

/// One day in milliseconds, the day-rollover correction.
pub const DAY_MS: i64 = 86_400_000;

pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Resolve an `"HH:MM"` entry onto `reference`'s calendar day.
///
/// Anything after the first whitespace is ignored, so `"05:12 (CET)"`
/// resolves like `"05:12"`. Returns `None` for a missing or malformed entry.
pub fn resolve_time_of_day(raw: Option<&str>, reference: NaiveDateTime) -> Option<NaiveDateTime> {
    let time = parse_hh_mm(raw?)?;
    Some(reference.date().and_time(time))
}

/// Parse the leading `"HH:MM"` of a timing string.
pub fn parse_hh_mm(raw: &str) -> Option<NaiveTime> {
    let token = raw.split_whitespace().next()?;
    let (h, m) = token.split_once(':')?;
    let hour: u32 = h.trim().parse().ok()?;
    let minute: u32 = m.trim().parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// `later - earlier` in milliseconds; negative when `later` is before.
pub fn millis_between(later: NaiveDateTime, earlier: NaiveDateTime) -> i64 {
    (later - earlier).num_milliseconds()
}

/// Add a day when `diff` went negative across midnight.
pub fn roll_over(diff: i64) -> i64 {
    if diff < 0 { diff + DAY_MS } else { diff }
}
