//! Clock sequence state shared by the time-based (version 1 and 2) generators.

use log::{debug, trace};

use crate::generator::{RandSource, TimeSource};

/// Number of 100-nanosecond intervals between the Gregorian epoch (1582-10-15) and the Unix epoch.
pub const GREGORIAN_OFFSET: u64 = 0x01b2_1dd2_1381_4000;

/// Largest value representable by the 60-bit `timestamp` field.
pub const MAX_TIMESTAMP: u64 = (1 << 60) - 1;

/// Largest value representable by the 14-bit `clock_seq` field.
pub const MAX_SEQUENCE: u16 = (1 << 14) - 1;

/// A triple of timestamp, clock sequence, and node identifier that is unique within the lifetime of
/// the [`ClockSequence`] that issued it.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct ClockTicket {
    /// 60-bit count of 100-nanosecond intervals since 1582-10-15.
    pub timestamp: u64,
    /// 14-bit clock sequence.
    pub sequence: u16,
    /// 48-bit node identifier.
    pub node: [u8; 6],
}

/// Represents the state of a time-based UUID generator: the latest timestamp issued, the clock
/// sequence, and the node identifier.
///
/// Every call to [`next()`](ClockSequence::next) returns a [`ClockTicket`] whose `(timestamp,
/// sequence)` pair differs from all the tickets issued before by the same object, even when the
/// system clock does not advance or goes backwards:
///
/// - When the clock reports a timestamp greater than the latest one, the new timestamp is adopted
///   and the clock sequence is kept.
/// - Otherwise, the latest timestamp is reused and the clock sequence is incremented (wrapping at
///   14 bits). Once all 16,384 sequence values have been issued for a timestamp, the timestamp is
///   advanced by one, so the timestamp may run slightly ahead of the real-time clock.
///
/// This type is not synchronized; wrap it in a lock, as
/// [`TimeBasedGenerator`](crate::TimeBasedGenerator) does, to share it across threads.
///
/// # Examples
///
/// ```rust
/// use uuid4122::{ClockSequence, Uuid};
///
/// let mut cs = ClockSequence::with_rand08(rand::rngs::OsRng);
/// let t = cs.next_core(0x1e7_4ba2_2061_6934);
/// let uuid = Uuid::from_fields_v1(t.timestamp, t.sequence, &t.node);
/// assert_eq!(uuid.timestamp(), Some(0x1e7_4ba2_2061_6934));
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ClockSequence<R, T> {
    timestamp: u64,
    sequence: u16,

    /// The clock sequence value issued first for the current `timestamp`.
    window_start: u16,

    node: [u8; 6],

    /// The random number generator used to seed the clock sequence and the node identifier.
    rand_source: R,

    /// The system clock used by the generator.
    time_source: T,
}

impl<R: RandSource, T: TimeSource> ClockSequence<R, T> {
    /// Creates a clock sequence with a random initial sequence and a random node identifier, which
    /// has the multicast bit set so it never clashes with an IEEE 802 address.
    pub fn with_rand_and_time_sources(mut rand_source: R, time_source: T) -> Self {
        let sequence = clock_seq_init(&mut rand_source);
        let node = random_node(&mut rand_source);
        Self {
            timestamp: 0,
            sequence,
            window_start: sequence,
            node,
            rand_source,
            time_source,
        }
    }

    /// Replaces the node identifier, e.g. with a hardware address of the host.
    pub fn with_node(mut self, node: [u8; 6]) -> Self {
        self.node = node;
        self
    }

    /// Returns the node identifier.
    pub fn node(&self) -> [u8; 6] {
        self.node
    }

    /// Returns a mutable reference to the random number generator.
    pub fn rand_source_mut(&mut self) -> &mut R {
        &mut self.rand_source
    }

    /// Draws a new random clock sequence and node identifier.
    ///
    /// Useful when the state may have been duplicated, e.g. in a child process after a fork. The
    /// latest timestamp is advanced by one so that later tickets stay distinct from the earlier
    /// ones issued by this object.
    pub fn reseed(&mut self) {
        self.timestamp = (self.timestamp + 1) & MAX_TIMESTAMP;
        self.sequence = clock_seq_init(&mut self.rand_source);
        self.window_start = self.sequence;
        self.node = random_node(&mut self.rand_source);
        debug!("reseeded clock sequence");
    }

    /// Issues the next ticket based on the current time reported by the time source.
    pub fn next(&mut self) -> ClockTicket {
        let unix_ts_100ns = self.time_source.unix_ts_100ns();
        self.next_core(unix_ts_100ns.wrapping_add(GREGORIAN_OFFSET))
    }

    /// Issues the next ticket based on `timestamp`, a count of 100-nanosecond intervals since
    /// 1582-10-15. Bits beyond the 60-bit field width are discarded.
    pub fn next_core(&mut self, timestamp: u64) -> ClockTicket {
        let timestamp = timestamp & MAX_TIMESTAMP;
        if timestamp > self.timestamp {
            self.timestamp = timestamp;
            self.window_start = self.sequence;
        } else {
            if timestamp < self.timestamp {
                debug!(
                    "clock went backwards by {} x 100ns; reusing previous timestamp",
                    self.timestamp - timestamp
                );
            }

            self.sequence = (self.sequence + 1) & MAX_SEQUENCE;
            if self.sequence == self.window_start {
                // all sequence values used up for this timestamp
                self.timestamp = (self.timestamp + 1) & MAX_TIMESTAMP;
                trace!("clock sequence exhausted; advanced timestamp to {}", self.timestamp);
            }
        }

        ClockTicket {
            timestamp: self.timestamp,
            sequence: self.sequence,
            node: self.node,
        }
    }
}

/// Returns a random 14-bit initial clock sequence.
pub(crate) fn clock_seq_init<R: RandSource>(rand_source: &mut R) -> u16 {
    rand_source.next_u32() as u16 & MAX_SEQUENCE
}

/// Returns a random 48-bit node identifier with the multicast bit set.
fn random_node<R: RandSource>(rand_source: &mut R) -> [u8; 6] {
    let bytes = rand_source.next_u64().to_be_bytes();
    let mut node = [0u8; 6];
    node.copy_from_slice(&bytes[2..]);
    node[0] |= 0x01;
    node
}

#[cfg(test)]
mod tests {
    use super::{clock_seq_init, ClockSequence, MAX_SEQUENCE, MAX_TIMESTAMP};
    use crate::generator::{with_rand08, RandSource, TimeSource};

    /// A time source that returns a fixed timestamp.
    struct FixedTime(u64);

    impl TimeSource for FixedTime {
        fn unix_ts_100ns(&mut self) -> u64 {
            self.0
        }
    }

    type TestSeq = ClockSequence<with_rand08::Adapter<rand::rngs::ThreadRng>, FixedTime>;

    fn new_clock_seq() -> TestSeq {
        ClockSequence::with_rand_and_time_sources(
            with_rand08::Adapter(rand::thread_rng()),
            FixedTime(0),
        )
    }

    /// Issues unique tickets even with decreasing or constant timestamp
    #[test]
    fn issues_unique_tickets_even_with_decreasing_or_constant_timestamp() {
        use std::collections::HashSet;

        let ts = 0x01e7_4ba2_2061_6934u64;
        let mut cs = new_clock_seq();
        let first = cs.next_core(ts);
        assert_eq!(first.timestamp, ts);

        let mut s = HashSet::new();
        s.insert((first.timestamp, first.sequence));
        let mut prev = first;
        for i in 0..100_000u64 {
            let curr = cs.next_core(ts - i.min(4_000));
            assert!(curr.timestamp >= prev.timestamp);
            assert!(s.insert((curr.timestamp, curr.sequence)));
            assert_eq!(curr.node, first.node);
            prev = curr;
        }

        // 100,001 tickets exhaust six full sequence windows
        assert!(prev.timestamp >= ts + 6);
    }

    /// Keeps sequence when timestamp advances
    #[test]
    fn keeps_sequence_when_timestamp_advances() {
        let mut cs = new_clock_seq();
        let a = cs.next_core(1_000);
        let b = cs.next_core(2_000);
        assert_eq!(b.timestamp, 2_000);
        assert_eq!(b.sequence, a.sequence);
    }

    /// Increments sequence on clock regression
    #[test]
    fn increments_sequence_on_clock_regression() {
        let mut cs = new_clock_seq();
        let a = cs.next_core(5_000);
        let b = cs.next_core(4_000);
        assert_eq!(b.timestamp, 5_000);
        assert_eq!(b.sequence, (a.sequence + 1) & MAX_SEQUENCE);

        let c = cs.next_core(5_000);
        assert_eq!(c.timestamp, 5_000);
        assert_eq!(c.sequence, (a.sequence + 2) & MAX_SEQUENCE);
    }

    /// Advances timestamp when sequence space is exhausted
    #[test]
    fn advances_timestamp_when_sequence_space_is_exhausted() {
        let mut cs = new_clock_seq();
        let first = cs.next_core(7_000);
        for _ in 0..MAX_SEQUENCE {
            let t = cs.next_core(7_000);
            assert_eq!(t.timestamp, 7_000);
            assert_ne!(t.sequence, first.sequence);
        }

        let t = cs.next_core(7_000);
        assert_eq!(t.timestamp, 7_001);
        assert_eq!(t.sequence, first.sequence);
    }

    /// Discards timestamp bits beyond field width
    #[test]
    fn discards_timestamp_bits_beyond_field_width() {
        let mut cs = new_clock_seq();
        assert_eq!(cs.next_core(u64::MAX).timestamp, MAX_TIMESTAMP);
    }

    /// Reads time source and converts epoch
    #[test]
    fn reads_time_source_and_converts_epoch() {
        let mut cs = ClockSequence::with_rand_and_time_sources(
            with_rand08::Adapter(rand::thread_rng()),
            FixedTime(0),
        );
        // 1970-01-01 in 100ns intervals since 1582-10-15
        assert_eq!(cs.next().timestamp, 0x01b2_1dd2_1381_4000);
    }

    /// Sets multicast bit of random node and honors explicit node
    #[test]
    fn sets_multicast_bit_of_random_node_and_honors_explicit_node() {
        for _ in 0..1_000 {
            assert_eq!(new_clock_seq().node()[0] & 0x01, 0x01);
        }

        let node = [0x00, 0xc0, 0x4f, 0xd4, 0x30, 0xc8];
        let mut cs = new_clock_seq().with_node(node);
        assert_eq!(cs.next_core(1).node, node);
    }

    /// Reseeds without breaking uniqueness of subsequent tickets
    #[test]
    fn reseeds_without_breaking_uniqueness_of_subsequent_tickets() {
        let mut cs = new_clock_seq();
        let a = cs.next_core(9_000);
        cs.reseed();
        assert_eq!(cs.node()[0] & 0x01, 0x01);
        let b = cs.next_core(9_000);
        assert_eq!(b.timestamp, 9_001);
        assert_ne!((b.timestamp, b.sequence), (a.timestamp, a.sequence));
        let c = cs.next_core(9_500);
        assert_eq!(c.timestamp, 9_500);
    }

    /// Initializes clock sequence randomly
    #[test]
    fn initializes_clock_sequence_randomly() {
        let mut rng = with_rand08::Adapter(rand::thread_rng());
        let mut prev = clock_seq_init(&mut rng);
        let mut dup = 0;
        let mut max = prev;
        for _ in 0..100_000 {
            let curr = clock_seq_init(&mut rng);
            assert!(curr <= MAX_SEQUENCE);
            if curr == prev {
                dup += 1;
            }
            max = max.max(curr);
            prev = curr;
        }

        // about 6 consecutive duplicates are expected out of 100k draws from 14 bits
        assert!(dup < 30, "{} consecutive duplicates", dup);
        assert!(max > MAX_SEQUENCE / 2);
    }

    /// Uses random source for initial state
    #[test]
    fn uses_random_source_for_initial_state() {
        struct Counter(u64);
        impl RandSource for Counter {
            fn next_u32(&mut self) -> u32 {
                self.next_u64() as u32
            }
            fn next_u64(&mut self) -> u64 {
                self.0 += 1;
                self.0
            }
        }

        let mut cs = ClockSequence::with_rand_and_time_sources(Counter(0x4000), FixedTime(0));
        assert_eq!(cs.node(), [0x01, 0x00, 0x00, 0x00, 0x40, 0x02]);
        let t = cs.next_core(1);
        assert_eq!(t.sequence, 1); // 0x4001 masked to 14 bits
    }
}
