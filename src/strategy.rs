//! Interchangeable identifier generation strategies selected by configuration.
//!
//! A record store that needs a fresh primary key holds a [`GenerationStrategy`] and does not care
//! which UUID version it produces. [`Strategy`] is the configuration value that names one of the
//! built-in variants; it parses from a short string and, with the `serde` feature, deserializes
//! from one.

use core::{fmt, str};

use crate::generator::{EntropySource, TimeSource, V1Generator, V4Generator, V6Generator};
use crate::{Error, Uuid};

/// The shared interface of identifier generators.
pub trait GenerationStrategy {
    /// Returns the UUID version that this strategy produces.
    fn version(&self) -> u8;

    /// Generates a new identifier.
    fn generate(&mut self) -> Result<Uuid, Error>;
}

impl<R: EntropySource, T: TimeSource> GenerationStrategy for V6Generator<R, T> {
    fn version(&self) -> u8 {
        6
    }

    fn generate(&mut self) -> Result<Uuid, Error> {
        V6Generator::generate(self)
    }
}

impl<R: EntropySource, T: TimeSource> GenerationStrategy for V1Generator<R, T> {
    fn version(&self) -> u8 {
        1
    }

    fn generate(&mut self) -> Result<Uuid, Error> {
        V1Generator::generate(self)
    }
}

impl<R: EntropySource> GenerationStrategy for V4Generator<R> {
    fn version(&self) -> u8 {
        4
    }

    fn generate(&mut self) -> Result<Uuid, Error> {
        V4Generator::generate(self)
    }
}

/// Names a built-in generation strategy.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Strategy {
    /// Time-ordered UUIDv6 whose byte order follows the creation time.
    #[default]
    TimeOrdered,

    /// Gregorian-time UUIDv1 with the low timestamp bits first.
    TimeBased,

    /// Random UUIDv4.
    Random,
}

impl Strategy {
    /// Returns the UUID version that the strategy produces.
    pub const fn version(self) -> u8 {
        match self {
            Self::TimeOrdered => 6,
            Self::TimeBased => 1,
            Self::Random => 4,
        }
    }

    /// Returns the canonical configuration name of the strategy.
    pub const fn name(self) -> &'static str {
        match self {
            Self::TimeOrdered => "time-ordered",
            Self::TimeBased => "time-based",
            Self::Random => "random",
        }
    }

    /// Creates a generator implementing the strategy from an entropy source and a time source.
    ///
    /// The time source is dropped by the `Random` strategy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid6::{generator::StdSystemTime, with_rand08::Adapter, Strategy};
    ///
    /// let strategy: Strategy = "v6".parse()?;
    /// let mut g = strategy.build(Adapter(rand::rngs::OsRng), StdSystemTime);
    /// assert_eq!(g.generate()?.version(), Some(6));
    /// # Ok::<(), uuid6::Error>(())
    /// ```
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn build<R, T>(self, rng: R, time: T) -> Box<dyn GenerationStrategy + Send>
    where
        R: EntropySource + Send + 'static,
        T: TimeSource + Send + 'static,
    {
        match self {
            Self::TimeOrdered => Box::new(V6Generator::with_rand_and_time_sources(rng, time)),
            Self::TimeBased => Box::new(V1Generator::with_rand_and_time_sources(rng, time)),
            Self::Random => Box::new(V4Generator::new(rng)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl str::FromStr for Strategy {
    type Err = Error;

    /// Parses a strategy name or UUID version, ignoring ASCII case.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const NAMES: &[(&str, Strategy)] = &[
            ("time-ordered", Strategy::TimeOrdered),
            ("v6", Strategy::TimeOrdered),
            ("6", Strategy::TimeOrdered),
            ("time-based", Strategy::TimeBased),
            ("v1", Strategy::TimeBased),
            ("1", Strategy::TimeBased),
            ("random", Strategy::Random),
            ("v4", Strategy::Random),
            ("4", Strategy::Random),
        ];

        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(src))
            .map(|&(_, strategy)| strategy)
            .ok_or(Error::MalformedInput("unknown generation strategy"))
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Strategy};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Strategy {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> serde::Deserialize<'de> for Strategy {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_str(VisitorImpl)
        }
    }

    struct VisitorImpl;

    impl de::Visitor<'_> for VisitorImpl {
        type Value = Strategy;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a generation strategy name")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }
    }

}
