//! Time-based UUID generator and the random number and time source interfaces.

pub mod with_rand08;

/// A trait that defines the minimum random number generator interface for [`ClockSequence`].
///
/// [`ClockSequence`]: crate::ClockSequence
pub trait RandSource {
    /// Returns the next random `u32`.
    fn next_u32(&mut self) -> u32;

    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;
}

/// A trait that defines the minimum system clock interface for [`ClockSequence`].
///
/// [`ClockSequence`]: crate::ClockSequence
pub trait TimeSource {
    /// Returns the current Unix timestamp as a count of 100-nanosecond intervals.
    fn unix_ts_100ns(&mut self) -> u64;
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub struct StdSystemTime;

#[cfg(feature = "std")]
impl TimeSource for StdSystemTime {
    fn unix_ts_100ns(&mut self) -> u64 {
        use std::time;
        (time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_nanos()
            / 100) as u64
    }
}

#[cfg(feature = "std")]
pub use std_gen::TimeBasedGenerator;

#[cfg(feature = "std")]
mod std_gen {
    use std::sync::{Mutex, PoisonError};

    use super::{RandSource, StdSystemTime, TimeSource};
    use crate::{ClockSequence, ClockTicket, Domain, Uuid};

    /// Represents a UUIDv1 and UUIDv2 generator that owns a [`ClockSequence`] and serializes all
    /// access to it with a mutex, so it can be shared across threads.
    ///
    /// No two UUIDs generated by the same object are identical, no matter how many threads call it
    /// concurrently.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rand::rngs::OsRng;
    /// use std::{sync, thread};
    /// use uuid4122::TimeBasedGenerator;
    ///
    /// let g = sync::Arc::new(TimeBasedGenerator::with_rand08(OsRng));
    /// thread::scope(|s| {
    ///     for i in 0..4 {
    ///         let g = sync::Arc::clone(&g);
    ///         s.spawn(move || {
    ///             for _ in 0..8 {
    ///                 println!("{} by thread {}", g.generate_v1(), i);
    ///                 thread::yield_now();
    ///             }
    ///         });
    ///     }
    /// });
    /// ```
    #[derive(Debug)]
    pub struct TimeBasedGenerator<R, T = StdSystemTime> {
        state: Mutex<ClockSequence<R, T>>,
    }

    impl<R: RandSource> TimeBasedGenerator<R> {
        /// Creates a generator from a random number generator and the system clock.
        ///
        /// # Examples
        ///
        /// ```rust
        /// use uuid4122::{generator::with_rand08::Adapter, TimeBasedGenerator};
        ///
        /// let g = TimeBasedGenerator::new(Adapter(rand::rngs::OsRng));
        /// assert_eq!(g.generate_v1().version(), Some(1));
        /// ```
        pub fn new(rand_source: R) -> Self {
            Self::with_rand_and_time_sources(rand_source, StdSystemTime)
        }
    }

    impl<R: RandSource, T: TimeSource> TimeBasedGenerator<R, T> {
        /// Creates a generator from the random number and time sources given.
        pub fn with_rand_and_time_sources(rand_source: R, time_source: T) -> Self {
            Self::from_clock_sequence(ClockSequence::with_rand_and_time_sources(
                rand_source,
                time_source,
            ))
        }

        /// Creates a generator that takes over an existing clock sequence state.
        pub fn from_clock_sequence(state: ClockSequence<R, T>) -> Self {
            Self {
                state: Mutex::new(state),
            }
        }

        /// Issues the next clock ticket while holding the lock.
        pub fn next_ticket(&self) -> ClockTicket {
            // the state is consistent at every point a panic can occur
            self.state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .next()
        }

        /// Generates a new UUIDv1 object from the current timestamp.
        pub fn generate_v1(&self) -> Uuid {
            let t = self.next_ticket();
            Uuid::from_fields_v1(t.timestamp, t.sequence, &t.node)
        }

        /// Generates a new UUIDv2 (DCE Security) object from the current timestamp, embedding
        /// `domain` and `local_id` (e.g. a POSIX UID or GID).
        pub fn generate_v2(&self, domain: Domain, local_id: u32) -> Uuid {
            let t = self.next_ticket();
            Uuid::from_fields_v2(t.timestamp, t.sequence, domain, local_id, &t.node)
        }
    }

}
