//! Integration with `rand` (v0.8) crate.

use super::{EntropySource, V1Generator, V4Generator, V6Generator};
use crate::Error;
use rand::RngCore;

/// An adapter that implements [`EntropySource`] for [`RngCore`] types.
///
/// Bits are drawn through [`RngCore::try_fill_bytes`], so a failing source such as an unavailable
/// OS random number generator surfaces as [`Error::EntropySourceUnavailable`].
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> EntropySource for Adapter<T> {
    fn next_u64(&mut self) -> Result<u64, Error> {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.0.try_fill_bytes(dest).map_err(|err| {
            tracing::warn!(%err, "random number generator failed");
            Error::EntropySourceUnavailable
        })
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<T: RngCore> V6Generator<Adapter<T>, super::StdSystemTime> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate and the system clock.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid6::V6Generator;
    ///
    /// let mut g = V6Generator::with_rand08(rand::thread_rng());
    /// println!("{}", g.generate()?);
    /// # Ok::<(), uuid6::Error>(())
    /// ```
    pub const fn with_rand08(rng: T) -> Self {
        Self::with_rand_and_time_sources(Adapter(rng), super::StdSystemTime)
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<T: RngCore> V1Generator<Adapter<T>, super::StdSystemTime> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate and the system clock.
    pub const fn with_rand08(rng: T) -> Self {
        Self::with_rand_and_time_sources(Adapter(rng), super::StdSystemTime)
    }
}

impl<T: RngCore> V4Generator<Adapter<T>> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate.
    pub const fn with_rand08(rng: T) -> Self {
        Self::new(Adapter(rng))
    }
}
