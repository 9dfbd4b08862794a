//! FILETIME rendering

use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone, Utc};

use crate::config::FormatConfig;
use crate::{CommonError, Result};

/// Seconds between 1601-01-01 and 1970-01-01
pub const FILETIME_UNIX_EPOCH_SECS: i64 = 11_644_473_600;

/// FILETIME ticks per second (100ns resolution)
pub const FILETIME_TICKS_PER_SEC: u64 = 10_000_000;

// year is written separately, `%Y` signs years past 9999
const MONTH_TO_SECOND_FORMAT: &str = "%m-%d %H:%M:%S";

fn render(time: &NaiveDateTime) -> String {
    format!("{:04}-{}", time.year(), time.format(MONTH_TO_SECOND_FORMAT))
}

/// Format a UTC FILETIME in the host's local time zone
///
/// Renders `YYYY-MM-DD HH:MM:SS`. Fails with
/// [`CommonError::TimeConversion`] for values with the top bit set.
pub fn format_time(filetime: u64) -> Result<String> {
    let utc = filetime_to_utc(filetime)?;
    Ok(render(&utc.with_timezone(&Local).naive_local()))
}

/// [`format_time`], or [`format_local_time`] when `config.utc_timestamps` is set
pub fn format_time_with(config: &FormatConfig, filetime: u64) -> Result<String> {
    if config.utc_timestamps {
        format_local_time(filetime)
    } else {
        format_time(filetime)
    }
}

/// Format a FILETIME that is already in the wanted time zone
///
/// ```rust
/// use common::string::format_local_time;
///
/// assert_eq!(format_local_time(116_444_736_000_000_000).unwrap(), "1970-01-01 00:00:00");
/// ```
pub fn format_local_time(filetime: u64) -> Result<String> {
    Ok(render(&filetime_to_utc(filetime)?.naive_utc()))
}

/// Convert FILETIME ticks to a UTC timestamp
pub fn filetime_to_utc(filetime: u64) -> Result<DateTime<Utc>> {
    if filetime > i64::MAX as u64 {
        return Err(CommonError::TimeConversion(format!(
            "Failed to convert time: FILETIME {:#018x} is out of range",
            filetime
        )));
    }

    let secs = (filetime / FILETIME_TICKS_PER_SEC) as i64 - FILETIME_UNIX_EPOCH_SECS;
    let nanos = ((filetime % FILETIME_TICKS_PER_SEC) * 100) as u32;

    DateTime::<Utc>::from_timestamp(secs, nanos).ok_or_else(|| {
        CommonError::TimeConversion(format!(
            "Failed to convert time: FILETIME {} has no calendar representation",
            filetime
        ))
    })
}

/// Convert a calendar time to FILETIME ticks
///
/// Fails for times before 1601-01-01 and for times whose tick count does not
/// fit in 64 bits.
pub fn filetime_from_datetime<Tz: TimeZone>(time: &DateTime<Tz>) -> Result<u64> {
    filetime_from_naive(&time.naive_utc())
}

fn filetime_from_naive(time: &NaiveDateTime) -> Result<u64> {
    let utc = time.and_utc();
    let secs = utc.timestamp() + FILETIME_UNIX_EPOCH_SECS;
    let secs = u64::try_from(secs).map_err(|_| {
        CommonError::TimeConversion(format!(
            "Failed to convert time: {} precedes the FILETIME epoch",
            time
        ))
    })?;

    secs
        .checked_mul(FILETIME_TICKS_PER_SEC)
        .and_then(|ticks| ticks.checked_add(u64::from(utc.timestamp_subsec_nanos()) / 100))
        .ok_or_else(|| {
            CommonError::TimeConversion(format!(
                "Failed to convert time: {} is past the last FILETIME",
                time
            ))
        })
}
