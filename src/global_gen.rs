//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::generator::{StdSystemTime, V6Generator};
use crate::{Error, Strategy, Uuid};
use inner::{GlobalGenInner, GlobalGenRng};

/// Runs `f` with the process-wide global generator, creating one if none exists.
fn with_global_gen<F>(f: F) -> Result<Uuid, Error>
where
    F: FnOnce(&mut V6Generator<GlobalGenRng, StdSystemTime>) -> Result<Uuid, Error>,
{
    static G: sync::OnceLock<sync::Mutex<Option<GlobalGenInner>>> = sync::OnceLock::new();
    let mut slot = G
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(sync::PoisonError::into_inner);
    f(GlobalGenInner::get_mut(&mut slot)?)
}

/// Generates a UUIDv6 object from the system clock.
///
/// This function employs a global generator and guarantees the process-wide monotonic order of
/// UUIDs generated within the same 100-nanosecond tick. On Unix, this function resets the
/// generator when the process ID changes (i.e., upon process forks) to prevent collisions across
/// processes.
///
/// # Errors
///
/// Returns [`Error::EntropySourceUnavailable`] if the operating system cannot seed the generator
/// and [`Error::OutOfRange`] if the system clock reads a time before 1582-10-15.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid6::uuid6()?;
/// println!("{}", uuid); // e.g., "1ec9414c-232a-6b00-b3c8-9f6bdeced846"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
///
/// let uuid_string: String = uuid6::uuid6()?.to_string();
/// # Ok::<(), uuid6::Error>(())
/// ```
pub fn uuid6() -> Result<Uuid, Error> {
    with_global_gen(|g| g.generate())
}

/// Generates a UUIDv6 object for the current instant.
///
/// This is an alias of [`uuid6()`].
pub fn generate_now() -> Result<Uuid, Error> {
    uuid6()
}

/// Generates a UUIDv1 object from the system clock.
///
/// UUIDv1 values share the clock sequence state of [`uuid6()`] but do not sort by creation time.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid6::uuid1()?;
/// println!("{}", uuid); // e.g., "c232ab00-9414-11ec-b3c8-9f6bdeced846"
/// # Ok::<(), uuid6::Error>(())
/// ```
pub fn uuid1() -> Result<Uuid, Error> {
    with_global_gen(|g| g.generate_v1())
}

/// Generates a UUIDv4 object.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid6::uuid4()?;
/// println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// # Ok::<(), uuid6::Error>(())
/// ```
pub fn uuid4() -> Result<Uuid, Error> {
    with_global_gen(|g| g.generate_v4())
}

/// Generates a UUID object with the global generator following `strategy`.
///
/// # Examples
///
/// ```rust
/// use uuid6::Strategy;
///
/// let strategy: Strategy = "v1".parse()?;
/// assert_eq!(uuid6::uuid_with(strategy)?.version(), Some(1));
/// # Ok::<(), uuid6::Error>(())
/// ```
pub fn uuid_with(strategy: Strategy) -> Result<Uuid, Error> {
    match strategy {
        Strategy::TimeOrdered => uuid6(),
        Strategy::TimeBased => uuid1(),
        Strategy::Random => uuid4(),
    }
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::generator::{with_rand08::Adapter, StdSystemTime, V6Generator};
    use crate::Error;

    /// The type alias for the random number generator of the global generator.
    ///
    /// The global generator currently employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to
    /// emulate the strategy used by [`rand::rngs::ThreadRng`].
    pub type GlobalGenRng = Adapter<ReseedingRng<ChaCha12Core, OsRng>>;

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: V6Generator<GlobalGenRng, StdSystemTime>,
    }

    impl GlobalGenInner {
        fn new() -> Result<Self, Error> {
            let core = ChaCha12Core::from_rng(OsRng).map_err(|err| {
                tracing::warn!(%err, "could not seed global generator");
                Error::EntropySourceUnavailable
            })?;
            tracing::debug!("initialized global generator");
            Ok(Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: V6Generator::with_rand_and_time_sources(
                    Adapter(ReseedingRng::new(core, 1024 * 64, OsRng)),
                    StdSystemTime,
                ),
            })
        }

        #[cfg(unix)]
        fn is_current_process(&self) -> bool {
            self.pid == std::process::id()
        }

        #[cfg(not(unix))]
        fn is_current_process(&self) -> bool {
            true
        }

        /// Returns a mutable reference to the inner [`V6Generator`] instance, initializing the
        /// generator if absent and reseting it on Unix if the process ID has changed.
        ///
        /// A failed initialization leaves `slot` empty so that the next call retries.
        pub fn get_mut(
            slot: &mut Option<Self>,
        ) -> Result<&mut V6Generator<GlobalGenRng, StdSystemTime>, Error> {
            let inner = match slot.take() {
                Some(inner) if inner.is_current_process() => inner,
                Some(_) => {
                    tracing::debug!("process id changed; resetting global generator");
                    Self::new()?
                }
                None => Self::new()?,
            };
            Ok(&mut slot.insert(inner).generator)
        }
    }
}
