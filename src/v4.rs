//! UUIDv4-related functionality

use crate::{Uuid, Variant};
use rand::RngCore;

impl Uuid {
    /// Creates a UUIDv4 object from 16 random bytes, overwriting the version and variant fields.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        let mut uuid = Self::from_bytes_unchecked(bytes);
        uuid.set_version(4);
        uuid.set_variant(Variant::Var10);
        uuid
    }

    /// Creates a UUIDv4 object using the random number generator given.
    ///
    /// # Errors
    ///
    /// Returns the error of the random number generator as is. There is no fallback to a weaker
    /// source.
    pub fn try_new_v4_from<R: RngCore + ?Sized>(rng: &mut R) -> Result<Self, rand::Error> {
        let mut bytes = [0u8; 16];
        rng.try_fill_bytes(&mut bytes)?;
        Ok(Self::from_random_bytes(bytes))
    }

    /// Creates a UUIDv4 object using the random number generator of the operating system.
    ///
    /// # Panics
    ///
    /// Panics if the operating system fails to provide random bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid4122::Uuid;
    ///
    /// let uuid = Uuid::new_v4();
    /// println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
    /// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
    /// ```
    #[cfg(feature = "global_gen")]
    #[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
    pub fn new_v4() -> Self {
        match Self::try_new_v4_from(&mut rand::rngs::OsRng) {
            Ok(uuid) => uuid,
            Err(err) => panic!("uuid4122: could not obtain random bytes: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Uuid, Variant};
    use rand::RngCore;

    /// Stamps version and variant over random bytes
    #[test]
    fn stamps_version_and_variant_over_random_bytes() {
        for b in [0x00u8, 0x5a, 0xa5, 0xff] {
            let e = Uuid::from_random_bytes([b; 16]);
            assert_eq!(e.version(), Some(4));
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.as_bytes()[6] & 0x0f, b & 0x0f);
            assert_eq!(e.as_bytes()[8] & 0x3f, b & 0x3f);
            assert_eq!(e.as_bytes()[0], b);
        }
    }

    /// Propagates failure of random source
    #[test]
    fn propagates_failure_of_random_source() {
        struct Broken;
        impl RngCore for Broken {
            fn next_u32(&mut self) -> u32 {
                unreachable!()
            }
            fn next_u64(&mut self) -> u64 {
                unreachable!()
            }
            fn fill_bytes(&mut self, _: &mut [u8]) {
                unreachable!()
            }
            fn try_fill_bytes(&mut self, _: &mut [u8]) -> Result<(), rand::Error> {
                Err(rand::Error::new("entropy source unavailable"))
            }
        }

        assert!(Uuid::try_new_v4_from(&mut Broken).is_err());
        assert!(Uuid::try_new_v4_from(&mut rand::thread_rng()).is_ok());
    }
}
