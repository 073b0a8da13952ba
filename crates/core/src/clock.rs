//! Account-timezone date and time conversions.
//!
//! Every day-boundary computation in the system (what counts as "today",
//! the UTC window covering one local calendar day, converting working
//! hours to instants) goes through these helpers with the account's
//! timezone passed in explicitly. Nothing here consults process-local
//! time.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::errors::{GroomError, GroomResult};

/// Wire format for dates at the API boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for times at the API boundary (24-hour).
pub const TIME_FORMAT: &str = "%H:%M";

pub fn parse_date(value: &str) -> GroomResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| GroomError::Validation(format!("Invalid date (expected YYYY-MM-DD): {}", value)))
}

pub fn parse_time(value: &str) -> GroomResult<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|_| GroomError::Validation(format!("Invalid time (expected HH:MM): {}", value)))
}

/// The UTC instant for a local wall-clock (date, time) in `tz`. Around a
/// DST gap the earliest valid interpretation is used; a wall-clock time
/// skipped entirely by the transition is a validation error.
pub fn local_instant(tz: Tz, date: NaiveDate, time: NaiveTime) -> GroomResult<DateTime<Utc>> {
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            GroomError::Validation(format!(
                "Time {} does not exist on {} in {}",
                time.format(TIME_FORMAT),
                date,
                tz
            ))
        })
}

/// The half-open UTC window `[midnight, next midnight)` covering one local
/// calendar day in `tz`.
pub fn utc_day_window(tz: Tz, date: NaiveDate) -> GroomResult<(DateTime<Utc>, DateTime<Utc>)> {
    let start = local_instant(tz, date, NaiveTime::MIN)?;
    let next_day = date
        .checked_add_days(Days::new(1))
        .ok_or_else(|| GroomError::Validation(format!("Date out of range: {}", date)))?;
    let end = local_instant(tz, next_day, NaiveTime::MIN)?;
    Ok((start, end))
}

/// The local calendar date of a UTC instant in `tz`.
pub fn local_date(tz: Tz, instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// A UTC instant rendered as local HH:MM for the booking UI.
pub fn local_hhmm(tz: Tz, instant: DateTime<Utc>) -> String {
    instant.with_timezone(&tz).format(TIME_FORMAT).to_string()
}
