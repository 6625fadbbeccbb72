//! Error type shared by generation, parsing, and decoding.

/// Errors returned by fallible operations of this crate.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The instant precedes the Gregorian reform epoch (1582-10-15T00:00:00Z) or lies beyond the
    /// largest 60-bit timestamp.
    #[error("instant out of range for a 60-bit gregorian timestamp")]
    OutOfRange,

    /// The input is not a 128-bit identifier in one of the supported representations.
    #[error("malformed identifier: {0}")]
    MalformedInput(&'static str),

    /// The random number source could not supply entropy.
    #[error("entropy source unavailable")]
    EntropySourceUnavailable,

    /// The identifier carries a version other than the one the caller expected.
    #[error("unexpected uuid version: expected {expected}, found {found}")]
    VersionMismatch {
        /// The version the caller asked for.
        expected: u8,
        /// The version nibble read from the identifier.
        found: u8,
    },
}
