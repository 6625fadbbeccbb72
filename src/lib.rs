//! Time-ordered UUIDs (version 6) with Gregorian timestamp decoding
//!
//! ```rust
//! let uuid = uuid6::uuid6()?;
//! println!("{}", uuid); // e.g. "1ec9414c-232a-6b00-b3c8-9f6bdeced846"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! // recover the creation instant
//! println!("{}", uuid6::decode(&uuid)?); // e.g. "2022-02-22 19:22:22 UTC"
//! # Ok::<(), uuid6::Error>(())
//! ```
//!
//! See [RFC 9562](https://www.rfc-editor.org/rfc/rfc9562).
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           time_high                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           time_mid            |  ver  |       time_low        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|         clock_seq         |             node              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                              node                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 60-bit timestamp split into `time_high`, `time_mid`, and `time_low`
//!   counts 100-nanosecond ticks since 1582-10-15T00:00:00Z, the date of the
//!   Gregorian calendar reform, most significant bits first.
//! - The 4-bit `ver` field is set at `0110`.
//! - The 2-bit `var` field is set at `10`.
//! - The 14-bit `clock_seq` field is randomly initialized whenever the timestamp
//!   changes and incremented by one for each new ID generated within the same
//!   tick, which ensures the monotonic order of IDs.
//! - The 48-bit `node` field is filled with a cryptographically strong random
//!   number whose multicast bit is set, so it never collides with an IEEE 802
//!   MAC address.
//!
//! The timestamp runs out at 5236-03-31T21:21:00.6846975Z. Instants before the
//! reform epoch or after that limit are rejected with [`Error::OutOfRange`]
//! rather than truncated.
//!
//! In the very rare circumstances where the 14-bit `clock_seq` field reaches the
//! maximum value and can no more be incremented within the same tick, the
//! generator increments the timestamp; therefore, the timestamp may have a larger
//! value than that of the real-time clock. The generator goes on with such larger
//! timestamps caused by clock sequence overflows and system clock rollbacks as
//! long as the difference from the system clock is small enough. If the system
//! clock moves back more than ten seconds, the generator resets its state and
//! thus breaks the monotonic order of generated identifiers.
//!
//! # Decoding
//!
//! ```rust
//! let uuid: uuid6::Uuid = "1ec9414c-232a-6b00-b3c8-9f6bdeced846".parse()?;
//! assert_eq!(uuid6::extract_raw_timestamp(&uuid), 0x1ec9414c232ab00);
//! assert_eq!(uuid6::decode(&uuid)?.to_rfc3339(), "2022-02-22T19:22:22+00:00");
//! # Ok::<(), uuid6::Error>(())
//! ```
//!
//! # Other features
//!
//! This library also supports the generation of UUID version 1 and version 4,
//! selectable at run time through [`Strategy`]:
//!
//! ```rust
//! let uuid = uuid6::uuid4()?;
//! println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//!
//! let strategy: uuid6::Strategy = "time-based".parse()?;
//! println!("{}", uuid6::uuid_with(strategy)?); // e.g. "c232ab00-9414-11ec-b3c8-9f6bdeced846"
//! # Ok::<(), uuid6::Error>(())
//! ```
//!
//! # Crate features
//!
//! Default features:
//!
//! - `std` enables, among others, the system clock time source and conversion
//!   between [`Uuid`] and [`String`].
//! - `global_gen` (implies `std`) enables the primary [`uuid6()`] function and
//!   the other process-wide generator functions.
//!
//! Optional features:
//!
//! - `serde` enables the serialization and deserialization of [`Uuid`],
//!   [`UniqueId`], and [`Strategy`] objects.
//! - `uuid` enables the conversion between [`Uuid`] and `uuid::Uuid`.
//! - `cli` builds the `uuid6` command.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::Error;

mod id;
pub use id::{Uuid, Variant};

pub mod time;

mod decode;
pub use decode::{decode, decode_bytes, decode_checked, extract_raw_timestamp};

pub mod generator;
pub use generator::{
    generate, generate_seeded, with_rand08, V1Generator, V4Generator, V6Generator,
};

mod strategy;
pub use strategy::{GenerationStrategy, Strategy};

mod sequence;
pub use sequence::SyntheticSequence;

mod unique_id;
pub use unique_id::UniqueId;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{generate_now, uuid1, uuid4, uuid6, uuid_with};
