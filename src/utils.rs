use chrono::{DateTime, NaiveDate, Utc};

/// Consecutive days starting at `start`, `count` of them.
pub(crate) fn daily_range(start: NaiveDate, count: usize) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take(count)
}

/// Signed number of whole days from `from` to `to`.
pub(crate) fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Days since 1970-01-01, the physical representation of a polars `Date`.
pub(crate) fn to_epoch_days(date: NaiveDate) -> i32 {
    days_between(DateTime::<Utc>::UNIX_EPOCH.date_naive(), date) as i32
}

#[cfg(test)]
pub(crate) fn from_epoch_days(days: i32) -> NaiveDate {
    DateTime::<Utc>::UNIX_EPOCH.date_naive() + chrono::Duration::days(days as i64)
}
