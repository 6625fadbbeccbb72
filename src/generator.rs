//! UUIDv6 generator and related types.

use chrono::{DateTime, Utc};

use crate::time::{self, MAX_TICKS, TICKS_PER_SECOND};
use crate::{Error, Uuid};

pub mod with_rand08;

#[cfg(test)]
mod tests;

/// The largest 14-bit clock sequence.
const MAX_CLOCK_SEQ: u16 = (1 << 14) - 1;

/// The 48-bit node field mask.
const NODE_MASK: u64 = (1 << 48) - 1;

/// The multicast bit marks a node value that is not an IEEE 802 MAC address.
const MULTICAST_BIT: u64 = 1 << 40;

/// The default amount of timestamp rollback tolerated by the generator (ten seconds).
pub const DEFAULT_ROLLBACK_ALLOWANCE: u64 = 10 * TICKS_PER_SECOND;

/// A trait that defines the minimum random number source interface for the generators.
///
/// Unlike infallible random number generator traits, every method reports failure so that
/// generation aborts instead of silently continuing with weaker bits.
pub trait EntropySource {
    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> Result<u64, Error>;

    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error>;
}

/// A trait that defines the clock interface for the generators.
///
/// Any `FnMut() -> DateTime<Utc>` closure is a time source, which is handy for tests that need
/// deterministic instants.
pub trait TimeSource {
    /// Returns the current instant.
    fn now(&mut self) -> DateTime<Utc>;
}

impl<F: FnMut() -> DateTime<Utc>> TimeSource for F {
    fn now(&mut self) -> DateTime<Utc> {
        self()
    }
}

/// A time source that always returns the same instant.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct FixedTime(/** The instant returned. */ pub DateTime<Utc>);

impl TimeSource for FixedTime {
    fn now(&mut self) -> DateTime<Utc> {
        self.0
    }
}

/// The default time source that reads the system clock.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

#[cfg(feature = "std")]
impl TimeSource for StdSystemTime {
    fn now(&mut self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Generates a UUIDv6 for `instant` with a fresh random clock sequence and node.
///
/// This function holds no state, so it does not order identifiers that share a tick. Use
/// [`V6Generator`] for that.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] if `instant` cannot be expressed as a 60-bit Gregorian timestamp
/// and [`Error::EntropySourceUnavailable`] if `rng` fails.
///
/// # Examples
///
/// ```rust
/// use uuid6::{generate, time::reform_epoch, with_rand08::Adapter};
///
/// let uuid = generate(&reform_epoch(), &mut Adapter(rand::rngs::OsRng))?;
/// assert!(uuid.to_string().starts_with("00000000-0000-6000-"));
/// # Ok::<(), uuid6::Error>(())
/// ```
pub fn generate(instant: &DateTime<Utc>, rng: &mut impl EntropySource) -> Result<Uuid, Error> {
    let ticks = time::ticks_from_datetime(instant)?;
    let clock_seq = random_clock_seq(rng)?;
    let node = random_node(rng)?;
    Ok(Uuid::from_fields_v6(ticks, clock_seq, node))
}

/// Generates a UUIDv6 for `instant` with a caller-supplied clock sequence and node.
///
/// Only the low 14 bits of `clock_seq` and the low 48 bits of `node` are used.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] if `instant` cannot be expressed as a 60-bit Gregorian timestamp.
///
/// # Examples
///
/// ```rust
/// use uuid6::{generate_seeded, time::reform_epoch};
///
/// let uuid = generate_seeded(&reform_epoch(), 0, 0)?;
/// assert_eq!(uuid.to_string(), "00000000-0000-6000-8000-000000000000");
/// # Ok::<(), uuid6::Error>(())
/// ```
pub fn generate_seeded(instant: &DateTime<Utc>, clock_seq: u16, node: u64) -> Result<Uuid, Error> {
    let ticks = time::ticks_from_datetime(instant)?;
    Ok(Uuid::from_fields_v6(
        ticks,
        clock_seq & MAX_CLOCK_SEQ,
        node & NODE_MASK,
    ))
}

fn random_clock_seq(rng: &mut impl EntropySource) -> Result<u16, Error> {
    Ok((rng.next_u64()? >> 50) as u16)
}

fn random_node(rng: &mut impl EntropySource) -> Result<u64, Error> {
    Ok((rng.next_u64()? & NODE_MASK) | MULTICAST_BIT)
}

pub(crate) fn random_v4(rng: &mut impl EntropySource) -> Result<Uuid, Error> {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes)?;
    bytes[6] = 0x40 | (bytes[6] >> 4);
    bytes[8] = 0x80 | (bytes[8] >> 2);
    Ok(Uuid::from(bytes))
}

/// Represents a UUIDv6 generator that encapsulates a clock sequence and guarantees the monotonic
/// order of UUIDs generated within the same 100-nanosecond tick.
///
/// This type provides the interface to customize the entropy source, time source, and clock
/// rollback handling of a UUIDv6 generator. It also helps control the scope of guaranteed order of
/// the generated UUIDs. The following example guarantees the process-wide (cross-thread)
/// monotonicity using Rust's standard synchronization mechanism.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use std::{sync, thread};
/// use uuid6::V6Generator;
///
/// let g = sync::Arc::new(sync::Mutex::new(V6Generator::with_rand08(OsRng)));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.lock().unwrap().generate().unwrap(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
///
/// # Generator functions
///
/// The generator comes with four different methods that generate a UUIDv6:
///
/// | Flavor                     | Timestamp   | On big clock rewind |
/// | -------------------------- | ----------- | ------------------- |
/// | [`generate`]               | Time source | Resets generator    |
/// | [`generate_or_abort`]      | Time source | Returns `Ok(None)`  |
/// | [`generate_or_reset_core`] | Argument    | Resets generator    |
/// | [`generate_or_abort_core`] | Argument    | Returns `Ok(None)`  |
///
/// All of the four return a monotonically increasing UUID by reusing the previous timestamp and
/// incrementing the clock sequence even if the timestamp provided is smaller than the immediately
/// preceding UUID's. When the 14-bit clock sequence overflows, the timestamp is advanced by one
/// tick. However, when a clock rollback is considered significant (by default, more than ten
/// seconds):
///
/// 1.  `generate` (or_reset) methods reset the generator and return a new UUID based on the given
///     timestamp, breaking the increasing order of UUIDs.
/// 2.  `or_abort` variants abort and return `Ok(None)` immediately.
///
/// Every generated UUID receives a random 48-bit node with the multicast bit set.
///
/// [`generate`]: V6Generator::generate
/// [`generate_or_abort`]: V6Generator::generate_or_abort
/// [`generate_or_reset_core`]: V6Generator::generate_or_reset_core
/// [`generate_or_abort_core`]: V6Generator::generate_or_abort_core
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct V6Generator<R, T> {
    timestamp: Option<u64>,
    clock_seq: u16,

    /// The entropy source used by the generator.
    rng: R,

    /// The time source used by the generator.
    time: T,
}

impl<R, T> V6Generator<R, T> {
    /// Creates a generator instance with the specified entropy and time sources.
    pub const fn with_rand_and_time_sources(rng: R, time: T) -> Self {
        Self {
            timestamp: None,
            clock_seq: 0,
            rng,
            time,
        }
    }
}

impl<R: EntropySource, T: TimeSource> V6Generator<R, T> {
    /// Generates a new UUIDv6 object from the current timestamp, or resets the generator upon
    /// significant timestamp rollback.
    ///
    /// See the [`V6Generator`] type documentation for the description.
    pub fn generate(&mut self) -> Result<Uuid, Error> {
        let ticks = time::ticks_from_datetime(&self.time.now())?;
        self.generate_or_reset_core(ticks, DEFAULT_ROLLBACK_ALLOWANCE)
    }

    /// Generates a new UUIDv6 object from the current timestamp, or returns `Ok(None)` upon
    /// significant timestamp rollback.
    ///
    /// See the [`V6Generator`] type documentation for the description.
    pub fn generate_or_abort(&mut self) -> Result<Option<Uuid>, Error> {
        let ticks = time::ticks_from_datetime(&self.time.now())?;
        self.generate_or_abort_core(ticks, DEFAULT_ROLLBACK_ALLOWANCE)
    }

    /// Generates a new UUIDv6 object from the `timestamp` (ticks since 1582-10-15) passed, or
    /// resets the generator upon significant timestamp rollback.
    ///
    /// See the [`V6Generator`] type documentation for the description.
    ///
    /// The `rollback_allowance` parameter specifies the amount of `timestamp` rollback that is
    /// considered significant. A suggested value is [`DEFAULT_ROLLBACK_ALLOWANCE`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `timestamp` is not a 60-bit integer or the generator can
    /// no more advance its timestamp, and [`Error::EntropySourceUnavailable`] if the entropy
    /// source fails.
    pub fn generate_or_reset_core(
        &mut self,
        timestamp: u64,
        rollback_allowance: u64,
    ) -> Result<Uuid, Error> {
        let (timestamp, clock_seq, node) =
            self.next_fields_or_reset(timestamp, rollback_allowance)?;
        Ok(Uuid::from_fields_v6(timestamp, clock_seq, node))
    }

    /// Generates a new UUIDv6 object from the `timestamp` (ticks since 1582-10-15) passed, or
    /// returns `Ok(None)` upon significant timestamp rollback.
    ///
    /// See the [`V6Generator`] type documentation for the description.
    ///
    /// The `rollback_allowance` parameter specifies the amount of `timestamp` rollback that is
    /// considered significant. A suggested value is [`DEFAULT_ROLLBACK_ALLOWANCE`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `timestamp` is not a 60-bit integer or the generator can
    /// no more advance its timestamp, and [`Error::EntropySourceUnavailable`] if the entropy
    /// source fails.
    pub fn generate_or_abort_core(
        &mut self,
        timestamp: u64,
        rollback_allowance: u64,
    ) -> Result<Option<Uuid>, Error> {
        Ok(self
            .next_fields(timestamp, rollback_allowance)?
            .map(|(timestamp, clock_seq, node)| Uuid::from_fields_v6(timestamp, clock_seq, node)))
    }

    /// Generates a new UUIDv1 object from the current timestamp, sharing the clock sequence state
    /// with UUIDv6 generation.
    pub(crate) fn generate_v1(&mut self) -> Result<Uuid, Error> {
        let ticks = time::ticks_from_datetime(&self.time.now())?;
        let (timestamp, clock_seq, node) =
            self.next_fields_or_reset(ticks, DEFAULT_ROLLBACK_ALLOWANCE)?;
        Ok(Uuid::from_fields_v1(timestamp, clock_seq, node))
    }

    /// Generates a new UUIDv4 object utilizing the entropy source inside.
    #[cfg(feature = "global_gen")]
    pub(crate) fn generate_v4(&mut self) -> Result<Uuid, Error> {
        random_v4(&mut self.rng)
    }

    /// Returns the fields of the next UUID, resetting the state upon significant rollback.
    fn next_fields_or_reset(
        &mut self,
        timestamp: u64,
        rollback_allowance: u64,
    ) -> Result<(u64, u16, u64), Error> {
        if let Some(fields) = self.next_fields(timestamp, rollback_allowance)? {
            return Ok(fields);
        }

        tracing::debug!(
            previous = ?self.timestamp,
            timestamp,
            "clock went backwards; resetting generator state"
        );
        self.clock_seq = random_clock_seq(&mut self.rng)?;
        self.timestamp = Some(timestamp);
        let node = random_node(&mut self.rng)?;
        Ok((timestamp, self.clock_seq, node))
    }

    /// Advances the timestamp and clock sequence state and draws a node, returning the fields of
    /// the next UUID or `None` upon significant rollback.
    fn next_fields(
        &mut self,
        timestamp: u64,
        rollback_allowance: u64,
    ) -> Result<Option<(u64, u16, u64)>, Error> {
        if timestamp > MAX_TICKS {
            return Err(Error::OutOfRange);
        }

        let timestamp = match self.timestamp {
            Some(prev) if timestamp <= prev => {
                if timestamp.saturating_add(rollback_allowance) < prev {
                    // abort if clock went backwards to unbearable extent
                    return Ok(None);
                } else if self.clock_seq < MAX_CLOCK_SEQ {
                    // go on with previous timestamp if new one is not much smaller
                    self.clock_seq += 1;
                    prev
                } else if prev < MAX_TICKS {
                    // increment timestamp at clock sequence overflow
                    self.clock_seq = random_clock_seq(&mut self.rng)?;
                    prev + 1
                } else {
                    return Err(Error::OutOfRange);
                }
            }
            _ => {
                self.clock_seq = random_clock_seq(&mut self.rng)?;
                timestamp
            }
        };
        self.timestamp = Some(timestamp);

        let node = random_node(&mut self.rng)?;
        Ok(Some((timestamp, self.clock_seq, node)))
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv6 object for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use uuid6::V6Generator;
///
/// V6Generator::with_rand08(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e.unwrap()));
/// ```
impl<R: EntropySource, T: TimeSource> Iterator for V6Generator<R, T> {
    type Item = Result<Uuid, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: EntropySource, T: TimeSource> core::iter::FusedIterator for V6Generator<R, T> {}

/// Represents a UUIDv1 generator.
///
/// UUIDv1 carries the same Gregorian timestamp, clock sequence, and node as UUIDv6, so this type
/// shares the [`V6Generator`] state machine and only lays the fields out differently. The byte
/// order of UUIDv1 values does not follow their creation time.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct V1Generator<R, T>(V6Generator<R, T>);

impl<R, T> V1Generator<R, T> {
    /// Creates a generator instance with the specified entropy and time sources.
    pub const fn with_rand_and_time_sources(rng: R, time: T) -> Self {
        Self(V6Generator::with_rand_and_time_sources(rng, time))
    }
}

impl<R: EntropySource, T: TimeSource> V1Generator<R, T> {
    /// Generates a new UUIDv1 object from the current timestamp, or resets the generator upon
    /// significant timestamp rollback.
    pub fn generate(&mut self) -> Result<Uuid, Error> {
        self.0.generate_v1()
    }
}

/// Represents a UUIDv4 generator that fills 122 bits with random data.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct V4Generator<R> {
    /// The entropy source used by the generator.
    rng: R,
}

impl<R> V4Generator<R> {
    /// Creates a generator instance with the specified entropy source.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: EntropySource> V4Generator<R> {
    /// Generates a new UUIDv4 object.
    pub fn generate(&mut self) -> Result<Uuid, Error> {
        random_v4(&mut self.rng)
    }
}
