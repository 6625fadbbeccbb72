use core::{fmt, str};

use chrono::{DateTime, Utc};

use crate::{decode, Error, Uuid};

/// An immutable time-ordered identifier as stored alongside a record.
///
/// Equality, hashing, and ordering all operate on the underlying 128-bit value, so two `UniqueId`
/// values are equal exactly when their bytes are equal and identifiers with a later timestamp
/// compare greater.
///
/// # Examples
///
/// ```rust
/// use uuid6::UniqueId;
///
/// let a: UniqueId = "1ec9414c-232a-6b00-b3c8-9f6bdeced846".parse()?;
/// let b: UniqueId = "1ec9414c-232a-6b01-8000-000000000000".parse()?;
/// assert!(a < b);
/// assert_eq!(a.timestamp(), 0x1ec9414c232ab00);
/// assert_eq!(a.instant()?.to_rfc3339(), "2022-02-22T19:22:22+00:00");
/// # Ok::<(), uuid6::Error>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct UniqueId(Uuid);

impl UniqueId {
    /// Wraps a [`Uuid`].
    pub const fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns a reference to the wrapped [`Uuid`].
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the raw number of 100-nanosecond ticks since the reform epoch.
    pub const fn timestamp(&self) -> u64 {
        decode::extract_raw_timestamp(&self.0)
    }

    /// Returns the calendar instant at which the identifier was generated.
    pub fn instant(&self) -> Result<DateTime<Utc>, Error> {
        decode::decode(&self.0)
    }

    /// Returns the canonical hyphenated string without heap allocation.
    pub fn encode(&self) -> fstr::FStr<36> {
        self.0.encode()
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl str::FromStr for UniqueId {
    type Err = Error;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        src.parse().map(Self)
    }
}

impl From<Uuid> for UniqueId {
    fn from(src: Uuid) -> Self {
        Self(src)
    }
}

impl From<UniqueId> for Uuid {
    fn from(src: UniqueId) -> Self {
        src.0
    }
}

impl AsRef<Uuid> for UniqueId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{UniqueId, Uuid};
    use serde::{Deserializer, Serializer};

    impl serde::Serialize for UniqueId {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serde::Serialize::serialize(&self.0, serializer)
        }
    }

    impl<'de> serde::Deserialize<'de> for UniqueId {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            <Uuid as serde::Deserialize>::deserialize(deserializer).map(Self)
        }
    }
}
