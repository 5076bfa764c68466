//! Integration with `rand` (v0.8) crate.

use super::RandSource;
use rand::RngCore;

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }
}

#[cfg(feature = "std")]
impl<T: RngCore> crate::ClockSequence<Adapter<T>, super::StdSystemTime> {
    /// Creates a clock sequence with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate and the system clock.
    pub fn with_rand08(rng: T) -> Self {
        Self::with_rand_and_time_sources(Adapter(rng), super::StdSystemTime)
    }
}

#[cfg(feature = "std")]
impl<T: RngCore> super::TimeBasedGenerator<Adapter<T>> {
    /// Creates a generator with a specified random number generator that implements [`RngCore`]
    /// from `rand` (v0.8) crate and the system clock.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid4122::TimeBasedGenerator;
    ///
    /// let g = TimeBasedGenerator::with_rand08(rand::rngs::OsRng);
    /// println!("{}", g.generate_v1());
    /// ```
    pub fn with_rand08(rng: T) -> Self {
        Self::new(Adapter(rng))
    }
}
