//! Predefined namespace UUIDs for name-based UUIDs (RFC 4122, Appendix C).

#![cfg(feature = "std")]
#![cfg_attr(docsrs, doc(cfg(feature = "std")))]

use std::sync::OnceLock;

use log::debug;

use crate::Uuid;

/// The namespaces predefined by RFC 4122.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Namespace {
    /// Fully qualified domain names.
    Dns,
    /// URLs.
    Url,
    /// ISO object identifiers.
    Oid,
    /// X.500 distinguished names, in DER or text output format.
    X500,
}

impl Namespace {
    /// All predefined namespaces.
    pub const ALL: [Self; 4] = [Self::Dns, Self::Url, Self::Oid, Self::X500];

    /// Returns the 8-4-4-4-12 string representation of the namespace UUID.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dns => "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
            Self::Url => "6ba7b811-9dad-11d1-80b4-00c04fd430c8",
            Self::Oid => "6ba7b812-9dad-11d1-80b4-00c04fd430c8",
            Self::X500 => "6ba7b814-9dad-11d1-80b4-00c04fd430c8",
        }
    }

    /// Returns the namespace UUID, parsing all the predefined namespaces on first use.
    pub fn uuid(self) -> Uuid {
        init()[self as usize]
    }
}

impl From<Namespace> for Uuid {
    fn from(src: Namespace) -> Self {
        src.uuid()
    }
}

/// Parses the predefined namespaces unless already done, and returns them in the order of
/// [`Namespace::ALL`].
///
/// Calling this function at startup is optional; every accessor calls it.
///
/// # Panics
///
/// Panics if a predefined literal fails to parse, which indicates a broken build.
pub fn init() -> &'static [Uuid; 4] {
    static PRESETS: OnceLock<[Uuid; 4]> = OnceLock::new();
    PRESETS.get_or_init(|| {
        debug!("parsing predefined namespaces");
        Namespace::ALL.map(|ns| match ns.as_str().parse::<Uuid>() {
            Ok(uuid) => uuid,
            Err(err) => panic!("uuid4122: could not parse namespace {:?}: {}", ns, err),
        })
    })
}

/// Returns the DNS namespace UUID (6ba7b810-9dad-11d1-80b4-00c04fd430c8).
pub fn dns() -> Uuid {
    Namespace::Dns.uuid()
}

/// Returns the URL namespace UUID (6ba7b811-9dad-11d1-80b4-00c04fd430c8).
pub fn url() -> Uuid {
    Namespace::Url.uuid()
}

/// Returns the ISO OID namespace UUID (6ba7b812-9dad-11d1-80b4-00c04fd430c8).
pub fn oid() -> Uuid {
    Namespace::Oid.uuid()
}

/// Returns the X.500 DN namespace UUID (6ba7b814-9dad-11d1-80b4-00c04fd430c8).
pub fn x500() -> Uuid {
    Namespace::X500.uuid()
}

#[cfg(test)]
mod tests {
    use super::{dns, init, oid, url, x500, Namespace};
    use crate::Uuid;

    /// Parses predefined namespaces once
    #[test]
    fn parses_predefined_namespaces_once() {
        let a = init();
        let b = init();
        assert!(std::ptr::eq(a, b));
        for (ns, e) in Namespace::ALL.iter().zip(a) {
            assert_eq!(&e.encode() as &str, ns.as_str());
            assert_eq!(e.version(), Some(1));
        }
    }

    /// Returns namespaces through every accessor
    #[test]
    fn returns_namespaces_through_every_accessor() {
        assert_eq!(dns().to_string(), "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
        assert_eq!(url().to_string(), "6ba7b811-9dad-11d1-80b4-00c04fd430c8");
        assert_eq!(oid().to_string(), "6ba7b812-9dad-11d1-80b4-00c04fd430c8");
        assert_eq!(x500().to_string(), "6ba7b814-9dad-11d1-80b4-00c04fd430c8");
        assert_eq!(Uuid::from(Namespace::Url), url());
    }
}
