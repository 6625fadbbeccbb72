//! Deterministic identifiers at synthetic instants.

use chrono::{DateTime, Utc};

use crate::time::{self, MAX_TICKS};
use crate::{Error, Uuid};

/// An iterator of UUIDv6 values at evenly spaced synthetic instants.
///
/// Each identifier carries a zero clock sequence and a zero node, so the sequence depends only on
/// the start instant and the step. Iteration ends before the timestamp would leave the 60-bit
/// range.
///
/// # Examples
///
/// ```rust
/// use uuid6::SyntheticSequence;
///
/// let ids: Vec<_> = SyntheticSequence::from_epoch(100).take(3).collect();
/// assert_eq!(ids[0].to_string(), "00000000-0000-6000-8000-000000000000");
/// assert_eq!(ids[2].to_string(), "00000000-0000-60c8-8000-000000000000");
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SyntheticSequence {
    next: Option<u64>,
    step: u64,
}

impl SyntheticSequence {
    /// Creates a sequence that starts at the reform epoch (tick zero) and advances by `step`
    /// ticks.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub const fn from_epoch(step: u64) -> Self {
        Self::from_ticks(0, step)
    }

    /// Creates a sequence that starts at `ticks` and advances by `step` ticks.
    ///
    /// The sequence is empty if `ticks` is not a 60-bit integer.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub const fn from_ticks(ticks: u64, step: u64) -> Self {
        assert!(step > 0, "step must be positive");
        Self {
            next: if ticks <= MAX_TICKS { Some(ticks) } else { None },
            step,
        }
    }

    /// Creates a sequence that starts at `instant`, truncated to a whole tick, and advances by
    /// `step` ticks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `instant` cannot be expressed as a 60-bit Gregorian
    /// timestamp.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn starting_at(instant: &DateTime<Utc>, step: u64) -> Result<Self, Error> {
        Ok(Self::from_ticks(time::ticks_from_datetime(instant)?, step))
    }
}

impl Iterator for SyntheticSequence {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        let ticks = self.next?;
        self.next = ticks
            .checked_add(self.step)
            .filter(|&next| next <= MAX_TICKS);
        Some(Uuid::from_fields_v6(ticks, 0, 0))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            None => (0, Some(0)),
            Some(ticks) => {
                let remaining = (MAX_TICKS - ticks) / self.step + 1;
                match usize::try_from(remaining) {
                    Ok(n) => (n, Some(n)),
                    Err(_) => (usize::MAX, None),
                }
            }
        }
    }
}

impl core::iter::FusedIterator for SyntheticSequence {}

#[cfg(test)]
mod tests {
    use super::SyntheticSequence;
    use crate::time::{reform_epoch, MAX_TICKS};
    use crate::{decode, extract_raw_timestamp, Error};
    use chrono::TimeDelta;

    /// Starts exactly at the reform epoch
    #[test]
    fn starts_exactly_at_the_reform_epoch() {
        let first = SyntheticSequence::from_epoch(100).next().unwrap();
        assert_eq!(extract_raw_timestamp(&first), 0);
        assert_eq!(decode(&first), Ok(reform_epoch()));
        assert_eq!(first.clock_seq(), 0);
        assert_eq!(first.node(), 0);
    }

    /// Produces increasing identifiers that decode to their synthetic instants
    #[test]
    fn produces_increasing_identifiers_that_decode_to_their_synthetic_instants() {
        let ids: Vec<_> = SyntheticSequence::from_epoch(100).take(21).collect();
        assert_eq!(ids.len(), 21);
        for (i, e) in ids.iter().enumerate() {
            assert_eq!(e.version(), Some(6));
            assert_eq!(extract_raw_timestamp(e), i as u64 * 100);
            assert_eq!(
                decode(e),
                Ok(reform_epoch() + TimeDelta::nanoseconds(i as i64 * 10_000))
            );
        }
        for w in ids.windows(2) {
            assert!(w[0] < w[1]);
            assert!(*w[0].encode() < *w[1].encode());
        }
    }

    /// Starts at a given instant
    #[test]
    fn starts_at_a_given_instant() {
        let start = reform_epoch() + TimeDelta::seconds(86_400) + TimeDelta::nanoseconds(150);
        let mut seq = SyntheticSequence::starting_at(&start, 1).unwrap();
        assert_eq!(
            seq.next().map(|e| extract_raw_timestamp(&e)),
            Some(864_000_000_001)
        );
        assert_eq!(
            seq.next().map(|e| extract_raw_timestamp(&e)),
            Some(864_000_000_002)
        );

        let before = reform_epoch() - TimeDelta::nanoseconds(1);
        assert_eq!(
            SyntheticSequence::starting_at(&before, 1),
            Err(Error::OutOfRange)
        );
    }

    /// Ends before leaving the 60-bit range
    #[test]
    fn ends_before_leaving_the_60_bit_range() {
        let seq = SyntheticSequence::from_ticks(MAX_TICKS - 2, 1);
        assert_eq!(seq.size_hint(), (3, Some(3)));
        let ticks: Vec<_> = seq.map(|e| extract_raw_timestamp(&e)).collect();
        assert_eq!(ticks, [MAX_TICKS - 2, MAX_TICKS - 1, MAX_TICKS]);

        let mut seq = SyntheticSequence::from_ticks(MAX_TICKS - 1, 10);
        assert!(seq.next().is_some());
        assert!(seq.next().is_none());
        assert!(seq.next().is_none());

        assert_eq!(SyntheticSequence::from_ticks(MAX_TICKS + 1, 1).count(), 0);
    }
}
