//! Conversion between calendar instants and 60-bit Gregorian timestamps.
//!
//! The timestamp of UUID versions 1 and 6 counts 100-nanosecond intervals ("ticks") elapsed since
//! the Gregorian calendar reform, 1582-10-15T00:00:00Z. All conversions use exact integer
//! arithmetic; precision below one tick is truncated on the way in and cannot be recovered.

use chrono::{DateTime, Utc};

use crate::Error;

/// Seconds from the Gregorian reform epoch (1582-10-15T00:00:00Z) to the Unix epoch.
pub const GREGORIAN_OFFSET_SECS: i64 = 12_219_292_800;

/// Number of 100-nanosecond ticks in one second.
pub const TICKS_PER_SECOND: u64 = 10_000_000;

/// Number of nanoseconds in one tick.
pub const NANOS_PER_TICK: u32 = 100;

/// The largest timestamp that fits in the 60-bit field (5236-03-31T21:21:00.6846975Z).
pub const MAX_TICKS: u64 = (1 << 60) - 1;

/// Returns the Gregorian reform epoch, 1582-10-15T00:00:00Z.
pub fn reform_epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(-GREGORIAN_OFFSET_SECS, 0).expect("reform epoch is representable")
}

/// Converts an instant to the number of ticks elapsed since the reform epoch.
///
/// Nanoseconds below the tick resolution are truncated. A leap second (represented by chrono as a
/// nanosecond part of one second or more) spills over into the following second.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] if `instant` precedes the reform epoch or lies beyond
/// [`MAX_TICKS`].
///
/// # Examples
///
/// ```rust
/// use uuid6::time::{reform_epoch, ticks_from_datetime};
///
/// assert_eq!(ticks_from_datetime(&reform_epoch()), Ok(0));
/// ```
pub fn ticks_from_datetime(instant: &DateTime<Utc>) -> Result<u64, Error> {
    let secs = instant
        .timestamp()
        .checked_add(GREGORIAN_OFFSET_SECS)
        .and_then(|secs| u64::try_from(secs).ok())
        .ok_or(Error::OutOfRange)?;
    let sub_ticks = u64::from(instant.timestamp_subsec_nanos() / NANOS_PER_TICK);
    secs.checked_mul(TICKS_PER_SECOND)
        .and_then(|ticks| ticks.checked_add(sub_ticks))
        .filter(|&ticks| ticks <= MAX_TICKS)
        .ok_or(Error::OutOfRange)
}

/// Converts a tick count since the reform epoch back to an instant.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] if `ticks` does not fit in 60 bits.
///
/// # Examples
///
/// ```rust
/// use uuid6::time::{datetime_from_ticks, reform_epoch};
///
/// let t = datetime_from_ticks(1)?;
/// assert_eq!(t - reform_epoch(), chrono::TimeDelta::nanoseconds(100));
/// # Ok::<(), uuid6::Error>(())
/// ```
pub fn datetime_from_ticks(ticks: u64) -> Result<DateTime<Utc>, Error> {
    if ticks > MAX_TICKS {
        return Err(Error::OutOfRange);
    }

    // both fit: ticks / 10^7 < 2^37 and the remainder is below 10^7
    let secs = (ticks / TICKS_PER_SECOND) as i64 - GREGORIAN_OFFSET_SECS;
    let nanos = (ticks % TICKS_PER_SECOND) as u32 * NANOS_PER_TICK;
    DateTime::from_timestamp(secs, nanos).ok_or(Error::OutOfRange)
}
