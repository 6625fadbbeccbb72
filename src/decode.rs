//! Recovery of creation instants from time-ordered UUIDs.
//!
//! [`extract_raw_timestamp()`] and [`decode()`] read the fixed UUIDv6 bit positions and never look
//! at the version nibble, so they return a meaningless instant for identifiers of other versions.
//! Use [`decode_checked()`] to reject foreign identifiers first.

use chrono::{DateTime, Utc};

use crate::{time, Error, Uuid};

/// Returns the number of 100-nanosecond ticks since 1582-10-15T00:00:00Z embedded in a UUIDv6.
///
/// # Examples
///
/// ```rust
/// let id: uuid6::Uuid = "00000000-0000-6001-8000-000000000000".parse()?;
/// assert_eq!(uuid6::extract_raw_timestamp(&id), 1);
/// # Ok::<(), uuid6::Error>(())
/// ```
pub const fn extract_raw_timestamp(id: &Uuid) -> u64 {
    id.gregorian_ticks()
}

/// Decodes the creation instant embedded in a UUIDv6.
///
/// The result has 100-nanosecond resolution.
///
/// # Examples
///
/// ```rust
/// let id: uuid6::Uuid = "1ec9414c-232a-6b00-b3c8-9f6bdeced846".parse()?;
/// assert_eq!(uuid6::decode(&id)?.to_rfc3339(), "2022-02-22T19:22:22+00:00");
/// # Ok::<(), uuid6::Error>(())
/// ```
pub fn decode(id: &Uuid) -> Result<DateTime<Utc>, Error> {
    time::datetime_from_ticks(extract_raw_timestamp(id))
}

/// Decodes the creation instant after checking that `id` is a UUIDv6.
///
/// # Errors
///
/// Returns [`Error::VersionMismatch`] if `id` is not an RFC 9562 variant UUID of version 6.
pub fn decode_checked(id: &Uuid) -> Result<DateTime<Utc>, Error> {
    match id.version() {
        Some(6) => decode(id),
        found => Err(Error::VersionMismatch {
            expected: 6,
            found: found.unwrap_or(id.as_bytes()[6] >> 4),
        }),
    }
}

/// Decodes the creation instant from the 16-byte big-endian binary representation.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] if `bytes` is not exactly 16 bytes long.
pub fn decode_bytes(bytes: &[u8]) -> Result<DateTime<Utc>, Error> {
    decode(&Uuid::try_from(bytes)?)
}
