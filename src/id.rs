use core::{fmt, str};
use fstr::FStr;

use crate::Error;

/// Represents a Universally Unique IDentifier.
///
/// The derived ordering compares the 16 bytes lexicographically, which is the same as comparing
/// the big-endian 128-bit integer values.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a UUID byte array from UUIDv6 field values.
    ///
    /// # Panics
    ///
    /// Panics if any argument exceeds its field width: 60 bits for `timestamp`, 14 bits for
    /// `clock_seq`, and 48 bits for `node`.
    pub const fn from_fields_v6(timestamp: u64, clock_seq: u16, node: u64) -> Self {
        if timestamp >= 1 << 60 || clock_seq >= 1 << 14 || node >= 1 << 48 {
            panic!("invalid field value");
        }

        Self([
            (timestamp >> 52) as u8,
            (timestamp >> 44) as u8,
            (timestamp >> 36) as u8,
            (timestamp >> 28) as u8,
            (timestamp >> 20) as u8,
            (timestamp >> 12) as u8,
            0x60 | ((timestamp >> 8) & 0x0f) as u8,
            timestamp as u8,
            0x80 | (clock_seq >> 8) as u8,
            clock_seq as u8,
            (node >> 40) as u8,
            (node >> 32) as u8,
            (node >> 24) as u8,
            (node >> 16) as u8,
            (node >> 8) as u8,
            node as u8,
        ])
    }

    /// Creates a UUID byte array from UUIDv1 field values.
    ///
    /// Version 1 stores the same 60-bit timestamp as version 6 but with the low 32 bits first, so
    /// its byte order does not follow the creation time.
    ///
    /// # Panics
    ///
    /// Panics if any argument exceeds its field width: 60 bits for `timestamp`, 14 bits for
    /// `clock_seq`, and 48 bits for `node`.
    pub const fn from_fields_v1(timestamp: u64, clock_seq: u16, node: u64) -> Self {
        if timestamp >= 1 << 60 || clock_seq >= 1 << 14 || node >= 1 << 48 {
            panic!("invalid field value");
        }

        Self([
            (timestamp >> 24) as u8,
            (timestamp >> 16) as u8,
            (timestamp >> 8) as u8,
            timestamp as u8,
            (timestamp >> 40) as u8,
            (timestamp >> 32) as u8,
            0x10 | ((timestamp >> 56) & 0x0f) as u8,
            (timestamp >> 48) as u8,
            0x80 | (clock_seq >> 8) as u8,
            clock_seq as u8,
            (node >> 40) as u8,
            (node >> 32) as u8,
            (node >> 24) as u8,
            (node >> 16) as u8,
            (node >> 8) as u8,
            node as u8,
        ])
    }

    /// Reads the 60-bit timestamp from the fixed UUIDv6 bit positions without checking the
    /// version.
    ///
    /// Use [`Uuid::timestamp_ticks()`] to read UUIDv1 values as well.
    pub const fn gregorian_ticks(&self) -> u64 {
        let n = u128::from_be_bytes(self.0);
        (((n >> 80) as u64) << 12) | ((n >> 64) as u64 & 0xfff)
    }

    /// Returns the 60-bit timestamp of a UUIDv1 or UUIDv6, or `None` for the other versions.
    pub const fn timestamp_ticks(&self) -> Option<u64> {
        let n = u128::from_be_bytes(self.0);
        match self.version() {
            Some(1) => Some(
                ((n >> 64) as u64 & 0xfff) << 48
                    | ((n >> 80) as u64 & 0xffff) << 32
                    | (n >> 96) as u64,
            ),
            Some(6) => Some(self.gregorian_ticks()),
            _ => None,
        }
    }

    /// Returns the 14-bit clock sequence field shared by UUID versions 1 and 6.
    pub const fn clock_seq(&self) -> u16 {
        u16::from_be_bytes([self.0[8], self.0[9]]) & 0x3fff
    }

    /// Returns the 48-bit node field shared by UUID versions 1 and 6.
    pub const fn node(&self) -> u64 {
        (u128::from_be_bytes(self.0) & 0xffff_ffff_ffff) as u64
    }

    /// Reports the variant field value of the UUID or, if appropriate, "NIL" or "MAX".
    ///
    /// For convenience, this method reports [`Variant::Nil`] or [`Variant::Max`] if `self`
    /// represents the Nil or Max UUID, although the Nil and Max UUIDs are technically subsumed
    /// under the variants `0b0` and `0b111`, respectively.
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0x0..=0x7 => {
                if u128::from_be_bytes(self.0) == 0 {
                    Variant::Nil
                } else {
                    Variant::Var0
                }
            }
            0x8..=0xb => Variant::Var10,
            0xc..=0xd => Variant::Var110,
            0xe..=0xf => {
                if u128::from_be_bytes(self.0) == u128::MAX {
                    Variant::Max
                } else {
                    Variant::VarReserved
                }
            }
            _ => unreachable!(),
        }
    }

    /// Returns the version field value of the UUID or `None` if `self` does not have the variant
    /// field value of `0b10`.
    pub const fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid6::Uuid;
    ///
    /// let x = "1ec9414c-232a-6b00-b3c8-9f6bdeced846".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "1ec9414c-232a-6b00-b3c8-9f6bdeced846");
    /// assert_eq!(format!("{}", y), "1ec9414c-232a-6b00-b3c8-9f6bdeced846");
    /// # Ok::<(), uuid6::Error>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut w = 0;
        for (i, e) in self.0.iter().enumerate() {
            buffer[w] = DIGITS[(e >> 4) as usize];
            buffer[w + 1] = DIGITS[(e & 15) as usize];
            w += 2;
            if i == 3 || i == 5 || i == 7 || i == 9 {
                buffer[w] = b'-';
                w += 1;
            }
        }
        debug_assert!(buffer.is_ascii());
        // SAFETY: the buffer contains only ASCII hex digits and hyphens
        unsafe { FStr::from_inner_unchecked(buffer) }
    }
}

/// UUID variants defined by RFC 9562.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// Nil UUID (00000000-0000-0000-0000-000000000000).
    Nil,

    /// The variant field value of `0b0`, excluding the Nil UUID.
    Var0,

    /// The variant field value of `0b10`, used by versions 1 through 8.
    Var10,

    /// The variant field value of `0b110`.
    Var110,

    /// The reserved variant field value of `0b111`, excluding the Max UUID.
    VarReserved,

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff).
    Max,
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = Error;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: Error = Error::MalformedInput("invalid string representation");
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            *e = (hi << 4) | lo;
            if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next().ok_or(ERR)? != '-' {
                return Err(ERR);
            }
        }
        if iter.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(ERR)
        }
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl TryFrom<&[u8]> for Uuid {
    type Error = Error;

    /// Creates an object from a byte slice that must be exactly 16 bytes long.
    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        <[u8; 16]>::try_from(src)
            .map(Self)
            .map_err(|_| Error::MalformedInput("expected exactly 16 bytes"))
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{Error, Uuid};

    impl From<Uuid> for String {
        fn from(src: Uuid) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for Uuid {
        type Error = Error;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl de::Visitor<'_> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Self::Value::try_from(value).map_err(de::Error::custom)
        }
    }

}
