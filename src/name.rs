//! Name-based (version 3 and 5) UUID construction.

use md5::Md5;
use sha1::{Digest, Sha1};

use crate::{Uuid, Variant};

/// The hash algorithms that name-based UUIDs are built from.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum HashAlgorithm {
    /// MD5, used by UUIDv3.
    Md5,
    /// SHA-1, used by UUIDv5.
    Sha1,
}

impl HashAlgorithm {
    /// Returns the version number of the UUIDs built with the algorithm.
    pub const fn version(self) -> u8 {
        match self {
            Self::Md5 => 3,
            Self::Sha1 => 5,
        }
    }

    /// Hashes `namespace` followed by `name` and builds a UUID from the first 16 bytes of the
    /// digest.
    ///
    /// The result depends only on the arguments; the same pair always yields the same UUID.
    pub fn hash_name(self, namespace: &Uuid, name: &[u8]) -> Uuid {
        let bytes = match self {
            Self::Md5 => digest_name::<Md5>(namespace, name),
            Self::Sha1 => digest_name::<Sha1>(namespace, name),
        };

        let mut uuid = Uuid::from_bytes_unchecked(bytes);
        uuid.set_version(self.version());
        uuid.set_variant(Variant::Var10);
        uuid
    }
}

fn digest_name<D: Digest>(namespace: &Uuid, name: &[u8]) -> [u8; 16] {
    let mut hasher = D::new();
    hasher.update(namespace.as_bytes());
    hasher.update(name);

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hasher.finalize()[..16]);
    bytes
}

impl Uuid {
    /// Creates a UUIDv3 object from a namespace and a name using MD5.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid4122::{Namespace, Uuid};
    ///
    /// let uuid = Uuid::new_v3(&Namespace::Dns.uuid(), "python.org");
    /// assert_eq!(uuid.to_string(), "6fa459ea-ee8a-3ca4-894e-db77e160355e");
    /// ```
    pub fn new_v3(namespace: &Uuid, name: impl AsRef<[u8]>) -> Self {
        HashAlgorithm::Md5.hash_name(namespace, name.as_ref())
    }

    /// Creates a UUIDv5 object from a namespace and a name using SHA-1.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid4122::{Namespace, Uuid};
    ///
    /// let uuid = Uuid::new_v5(&Namespace::Dns.uuid(), "python.org");
    /// assert_eq!(uuid.to_string(), "886313e1-3b8a-5372-9b90-0c9aee199e5d");
    /// ```
    pub fn new_v5(namespace: &Uuid, name: impl AsRef<[u8]>) -> Self {
        HashAlgorithm::Sha1.hash_name(namespace, name.as_ref())
    }
}
