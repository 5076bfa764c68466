//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::{Domain, Uuid};
use inner::GlobalGenInner;

/// Returns the lock handle of process-wide global generator, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .unwrap_or_else(sync::PoisonError::into_inner)
}

/// Generates a UUIDv1 object.
///
/// This function employs a global clock sequence and guarantees that no two UUIDs generated in
/// the same process are identical. On Unix, this function reseeds the random number generator and
/// redraws the clock sequence and node identifier when the process ID changes (i.e., upon process
/// forks) to prevent collisions across processes.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid4122::uuid1();
/// println!("{}", uuid); // e.g., "5c3a2f56-8f0e-11ef-a1b3-4b9c2e7d10f5"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
///
/// let uuid_string: String = uuid4122::uuid1().to_string();
/// ```
pub fn uuid1() -> Uuid {
    let t = lock_global_gen().get_mut().next();
    Uuid::from_fields_v1(t.timestamp, t.sequence, &t.node)
}

/// Generates a UUIDv2 (DCE Security) object for a local domain and identifier.
///
/// This function shares the global clock sequence with [`uuid1()`].
///
/// # Examples
///
/// ```rust
/// use uuid4122::Domain;
///
/// let uuid = uuid4122::uuid2(Domain::Person, 1000);
/// assert_eq!(uuid.version(), Some(2));
/// ```
pub fn uuid2(domain: Domain, local_id: u32) -> Uuid {
    let t = lock_global_gen().get_mut().next();
    Uuid::from_fields_v2(t.timestamp, t.sequence, domain, local_id, &t.node)
}

/// Generates a UUIDv3 object from a namespace and a name.
///
/// # Examples
///
/// ```rust
/// use uuid4122::Namespace;
///
/// let uuid = uuid4122::uuid3(&Namespace::Dns.uuid(), "python.org");
/// assert_eq!(uuid.to_string(), "6fa459ea-ee8a-3ca4-894e-db77e160355e");
/// ```
pub fn uuid3(namespace: &Uuid, name: impl AsRef<[u8]>) -> Uuid {
    Uuid::new_v3(namespace, name)
}

/// Generates a UUIDv4 object.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid4122::uuid4();
/// println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// ```
pub fn uuid4() -> Uuid {
    Uuid::new_v4()
}

/// Generates a UUIDv5 object from a namespace and a name.
///
/// # Examples
///
/// ```rust
/// use uuid4122::Namespace;
///
/// let uuid = uuid4122::uuid5(&Namespace::Dns.uuid(), "python.org");
/// assert_eq!(uuid.to_string(), "886313e1-3b8a-5372-9b90-0c9aee199e5d");
/// ```
pub fn uuid5(namespace: &Uuid, name: impl AsRef<[u8]>) -> Uuid {
    Uuid::new_v5(namespace, name)
}

mod inner {
    use log::debug;
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::generator::{RandSource, StdSystemTime};
    use crate::ClockSequence;

    /// The random number generator of the global generator.
    ///
    /// The global generator currently employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to
    /// emulate the strategy used by [`rand::rngs::ThreadRng`].
    pub struct GlobalGenRng(ReseedingRng<ChaCha12Core, OsRng>);

    impl GlobalGenRng {
        fn new() -> Self {
            let core = ChaCha12Core::from_rng(OsRng)
                .unwrap_or_else(|err| panic!("uuid4122: could not seed global generator: {}", err));
            Self(ReseedingRng::new(core, 1024 * 64, OsRng))
        }

        /// Discards the internal state, including buffered output, and reseeds from [`OsRng`].
        fn reseed(&mut self) {
            self.0
                .reseed()
                .unwrap_or_else(|err| panic!("uuid4122: could not reseed global generator: {}", err));
        }
    }

    impl RandSource for GlobalGenRng {
        fn next_u32(&mut self) -> u32 {
            rand::RngCore::next_u32(&mut self.0)
        }

        fn next_u64(&mut self) -> u64 {
            rand::RngCore::next_u64(&mut self.0)
        }
    }

    /// A thin wrapper to reseed the state when the process ID changes (i.e., upon Unix forks).
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        clock_seq: ClockSequence<GlobalGenRng, StdSystemTime>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            let clock_seq =
                ClockSequence::with_rand_and_time_sources(GlobalGenRng::new(), StdSystemTime);
            debug!("initialized global clock sequence with node {:02x?}", clock_seq.node());
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                clock_seq,
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`ClockSequence`] instance, reseeding the
        /// random number generator and redrawing the clock sequence and node identifier on Unix if
        /// the process ID has changed.
        pub fn get_mut(&mut self) -> &mut ClockSequence<GlobalGenRng, StdSystemTime> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                self.pid = std::process::id();
                self.clock_seq.rand_source_mut().reseed();
                self.clock_seq.reseed();
                debug!("process ID changed; new node {:02x?}", self.clock_seq.node());
            }
            &mut self.clock_seq
        }
    }

}

#[cfg(test)]
mod tests_v1 {
    use super::uuid1;
    use crate::Variant;

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES).map(|_| uuid1().into()).collect());

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-1[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Encodes up-to-date timestamp
    #[test]
    fn encodes_up_to_date_timestamp() {
        use crate::clock_seq::GREGORIAN_OFFSET;
        use crate::generator::{StdSystemTime, TimeSource};
        for _ in 0..10_000 {
            let ts_now = (StdSystemTime.unix_ts_100ns() + GREGORIAN_OFFSET) as i64;
            let timestamp = uuid1().timestamp().unwrap() as i64;
            // within 16 milliseconds
            assert!((ts_now - timestamp).abs() < 160_000);
        }
    }

    /// Shares one node identifier across calls
    #[test]
    fn shares_one_node_identifier_across_calls() {
        let node = uuid1().node();
        assert_eq!(node[0] & 0x01, 0x01);
        SAMPLES.with(|samples| {
            for e in samples.iter().take(1_000) {
                assert!(e.ends_with(&format!("{:02x}", node[5])));
            }
        });
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        for _ in 0..1_000 {
            let e = uuid1();
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(1));
        }
    }

    /// Generates no duplicates under multithreading
    #[test]
    fn generates_no_duplicates_under_multithreading() -> Result<(), Box<dyn std::error::Error>> {
        use std::{collections::HashSet, sync::mpsc, thread};

        let (tx, rx) = mpsc::channel();
        for _ in 0..10 {
            let tx = tx.clone();
            thread::Builder::new()
                .spawn(move || {
                    for _ in 0..1_000 {
                        tx.send(uuid1()).unwrap();
                    }
                })
                .map_err(|err| format!("failed to spawn thread: {:?}", err))?;
        }
        drop(tx);

        let mut s = HashSet::new();
        while let Ok(e) = rx.recv() {
            s.insert(e);
        }

        assert_eq!(s.len(), 10 * 1_000);
        Ok(())
    }
}
