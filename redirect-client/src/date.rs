use chrono::{Local, LocalResult, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone};
use thiserror::Error;

use crate::domain::UNSET_TIMESTAMP;

/// Calendar format exchanged with forms: `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Timestamp {0} is out of range")]
    OutOfRange(i64),
}

/// Parse a strict `YYYY-MM-DD` string.
pub fn parse_date(date: &str) -> Result<NaiveDate, DateError> {
    let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| DateError::InvalidDate(date.to_string()))?;

    // chrono accepts unpadded fields, forms never produce them
    if parsed.format(DATE_FORMAT).to_string() != date {
        return Err(DateError::InvalidDate(date.to_string()));
    }
    Ok(parsed)
}

/// Local midnight of `date` as epoch milliseconds. Absent or empty input is
/// [`UNSET_TIMESTAMP`].
pub fn date_to_timestamp(date: Option<&str>) -> Result<i64, DateError> {
    date_to_timestamp_in(&Local, date)
}

/// Midnight of `date` in `tz` as epoch milliseconds.
///
/// The offset is resolved for that particular date, so dates on both sides of
/// a daylight-saving transition land on their own local midnight. An
/// ambiguous midnight resolves to the earlier instant; a midnight skipped by a
/// DST gap resolves to the end of the gap, still on the same local day.
pub fn date_to_timestamp_in<Tz: TimeZone>(tz: &Tz, date: Option<&str>) -> Result<i64, DateError> {
    let Some(date) = date.filter(|d| !d.is_empty()) else {
        return Ok(UNSET_TIMESTAMP);
    };

    let midnight = parse_date(date)?.and_time(NaiveTime::MIN);
    let millis = match tz.from_local_datetime(&midnight) {
        LocalResult::Single(instant) => instant.timestamp_millis(),
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp_millis(),
        LocalResult::None => {
            // offset from before the gap, a day back is clear of any transition
            let offset = tz
                .offset_from_utc_datetime(&(midnight - TimeDelta::days(1)))
                .fix();
            midnight.and_utc().timestamp_millis() - i64::from(offset.local_minus_utc()) * 1000
        }
    };

    Ok(millis)
}

/// Local calendar date of `timestamp` as `YYYY-MM-DD`. [`UNSET_TIMESTAMP`]
/// becomes an empty string.
pub fn timestamp_to_date(timestamp: i64) -> Result<String, DateError> {
    timestamp_to_date_in(&Local, timestamp)
}

pub fn timestamp_to_date_in<Tz: TimeZone>(tz: &Tz, timestamp: i64) -> Result<String, DateError> {
    if timestamp == UNSET_TIMESTAMP {
        return Ok(String::new());
    }

    let instant = tz
        .timestamp_millis_opt(timestamp)
        .single()
        .ok_or(DateError::OutOfRange(timestamp))?;

    Ok(instant.date_naive().format(DATE_FORMAT).to_string())
}
