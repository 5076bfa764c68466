#[cfg(not(feature = "std"))]
use core as std;

use fstr::FStr;
use std::{fmt, str};

/// Represents a Universally Unique IDentifier laid out as defined by RFC 4122.
///
/// A value obtained from a generator or a checked parser always carries a version number from 1
/// to 5 and the RFC 4122 variant bits (`10`).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Creates an object from a byte array without checking the version and variant fields.
    ///
    /// The returned value may violate the invariants that the rest of this crate maintains; use
    /// [`Uuid::from_slice()`] or `TryFrom<[u8; 16]>` to get a validated object.
    pub const fn from_bytes_unchecked(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Consumes the object and returns the underlying byte array.
    pub const fn into_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Creates a UUIDv1 object from a 60-bit count of 100-nanosecond intervals since 1582-10-15,
    /// a 14-bit clock sequence, and a 48-bit node identifier.
    ///
    /// Bits of `timestamp` and `clock_seq` beyond their field widths are discarded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid4122::Uuid;
    ///
    /// let uuid = Uuid::from_fields_v1(0x1e7_4ba2_2061_6934, 0, &[1, 2, 3, 4, 5, 6]);
    /// assert_eq!(uuid.to_string(), "20616934-4ba2-11e7-8000-010203040506");
    /// ```
    pub fn from_fields_v1(timestamp: u64, clock_seq: u16, node: &[u8; 6]) -> Self {
        let mut uuid = Self::from_time_fields(timestamp, clock_seq, node);
        uuid.set_version(1);
        uuid.set_variant(Variant::Var10);
        uuid
    }

    /// Creates a UUIDv2 (DCE Security) object from the same time fields as [`from_fields_v1()`]
    /// plus a local domain and identifier.
    ///
    /// The full timestamp and clock sequence are retained so that the identifiers generated by a
    /// single clock sequence never collide; the node field carries the domain in its first byte,
    /// the local identifier in the following four bytes (big-endian), and the last byte of `node`.
    ///
    /// [`from_fields_v1()`]: Uuid::from_fields_v1
    pub fn from_fields_v2(
        timestamp: u64,
        clock_seq: u16,
        domain: Domain,
        local_id: u32,
        node: &[u8; 6],
    ) -> Self {
        let id = local_id.to_be_bytes();
        let node = [domain as u8, id[0], id[1], id[2], id[3], node[5]];
        let mut uuid = Self::from_time_fields(timestamp, clock_seq, &node);
        uuid.set_version(2);
        uuid.set_variant(Variant::Var10);
        uuid
    }

    fn from_time_fields(timestamp: u64, clock_seq: u16, node: &[u8; 6]) -> Self {
        let mut bytes = [0u8; 16];
        let mut time = [0u8; 8];
        insert_timestamp(&mut time, timestamp);
        bytes[..8].copy_from_slice(&time);
        bytes[8..10].copy_from_slice(&clock_seq.to_be_bytes());
        bytes[10..].copy_from_slice(node);
        Self(bytes)
    }

    /// Parses the 8-4-4-4-12 hexadecimal string representation.
    ///
    /// This is equivalent to `src.parse::<Uuid>()`.
    pub fn parse_str(src: &str) -> Result<Self, ParseError> {
        src.parse()
    }

    /// Creates an object from a byte slice, checking the length and the version and variant
    /// fields.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Size`] if `src` is not exactly 16 bytes long and
    /// [`ParseError::Format`] if the version is not between 1 and 5 or the variant is not the RFC
    /// 4122 one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid4122::{ParseError, Uuid};
    ///
    /// assert_eq!(Uuid::from_slice(&[0u8; 10]), Err(ParseError::Size));
    /// assert_eq!(Uuid::from_slice(&[0u8; 16]), Err(ParseError::Format));
    /// ```
    pub fn from_slice(src: &[u8]) -> Result<Self, ParseError> {
        <[u8; 16]>::try_from(src)
            .map_err(|_| ParseError::Size)
            .and_then(|bytes| Self(bytes).validate())
    }

    /// Returns the `variant` field value decoded from the most significant bits of byte 8.
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0x0..=0x7 => Variant::Var0,
            0x8..=0xb => Variant::Var10,
            0xc..=0xd => Variant::Var110,
            _ => Variant::VarReserved,
        }
    }

    /// Returns the `version` field value if the variant field is `10`, or `None` otherwise.
    pub const fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Returns the 60-bit count of 100-nanosecond intervals since 1582-10-15 if the object is a
    /// time-based (version 1 or 2) UUID.
    pub fn timestamp(&self) -> Option<u64> {
        match self.version() {
            Some(1 | 2) => {
                let b = &self.0;
                let time_low = u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as u64;
                let time_mid = u16::from_be_bytes([b[4], b[5]]) as u64;
                let time_hi = (u16::from_be_bytes([b[6], b[7]]) & 0x0fff) as u64;
                Some(time_hi << 48 | time_mid << 32 | time_low)
            }
            _ => None,
        }
    }

    /// Returns the 14-bit clock sequence if the object is a time-based (version 1 or 2) UUID.
    pub fn clock_sequence(&self) -> Option<u16> {
        match self.version() {
            Some(1 | 2) => Some(u16::from_be_bytes([self.0[8] & 0x3f, self.0[9]])),
            _ => None,
        }
    }

    /// Returns the last six bytes, which hold the node identifier in a UUIDv1.
    pub fn node(&self) -> [u8; 6] {
        let mut node = [0u8; 6];
        node.copy_from_slice(&self.0[10..]);
        node
    }

    /// Overwrites the `version` field (the most significant four bits of byte 6), leaving the
    /// rest of byte 6 untouched.
    pub(crate) fn set_version(&mut self, version: u8) {
        self.0[6] = (self.0[6] & 0x0f) | (version << 4);
    }

    /// Overwrites the `variant` field (the most significant bits of byte 8) with the bit pattern
    /// of `kind`, leaving the remaining bits untouched.
    pub(crate) fn set_variant(&mut self, kind: Variant) {
        let b = self.0[8];
        self.0[8] = match kind {
            Variant::Var0 => b & 0x7f,
            Variant::Var10 => (b & 0x3f) | 0x80,
            Variant::Var110 => (b & 0x1f) | 0xc0,
            Variant::VarReserved => (b & 0x1f) | 0xe0,
        };
    }

    /// Returns `self` if it carries a version from 1 to 5 and the RFC 4122 variant.
    const fn validate(self) -> Result<Self, ParseError> {
        match self.version() {
            Some(1..=5) => Ok(self),
            _ => Err(ParseError::Format),
        }
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string type.
    ///
    /// This method is primarily for `no_std` environments where heap-allocated string types are
    /// not readily available. Use the [`fmt::Display`] trait usually to get the 8-4-4-4-12
    /// canonical hexadecimal string representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid4122::Uuid;
    ///
    /// let x = "6ba7b810-9dad-11d1-80b4-00c04fd430c8".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    /// assert_eq!(format!("{}", y), "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    /// # Ok::<(), uuid4122::ParseError>(())
    /// ```
    pub const fn encode(&self) -> FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut r = 0;
        let mut w = 0;
        while r < 16 {
            let e = self.0[r] as usize;
            buffer[w] = DIGITS[e >> 4];
            buffer[w + 1] = DIGITS[e & 15];
            if r == 3 || r == 5 || r == 7 || r == 9 {
                buffer[w + 2] = b'-';
                w += 1;
            }
            r += 1;
            w += 2;
        }

        // SAFETY: ok because buffer consists of ASCII bytes
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }
}

/// Writes a 60-bit (or wider) timestamp into `buf` in the order of the RFC 4122 time fields:
/// `time_low` (least significant 32 bits), `time_mid` (next 16 bits), and `time_hi` (most
/// significant 16 bits), each big-endian.
///
/// All 64 bits of `timestamp` are written; the version field is stamped over the top nibble
/// afterwards.
///
/// # Examples
///
/// ```rust
/// let mut buf = [0u8; 8];
/// uuid4122::insert_timestamp(&mut buf, 0x0123_4567_89ab_cdef);
/// assert_eq!(buf, [0x89, 0xab, 0xcd, 0xef, 0x45, 0x67, 0x01, 0x23]);
/// ```
pub fn insert_timestamp(buf: &mut [u8; 8], timestamp: u64) {
    buf[..4].copy_from_slice(&(timestamp as u32).to_be_bytes());
    buf[4..6].copy_from_slice(&((timestamp >> 32) as u16).to_be_bytes());
    buf[6..].copy_from_slice(&((timestamp >> 48) as u16).to_be_bytes());
}

/// The reserved UUID variants, named after the bit pattern of the `variant` field.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// `0xxx`: reserved for NCS backward compatibility.
    Var0,
    /// `10xx`: the variant specified by RFC 4122.
    Var10,
    /// `110x`: reserved for Microsoft backward compatibility.
    Var110,
    /// `111x`: reserved for future definition.
    VarReserved,
}

/// The local domains of DCE Security (version 2) UUIDs.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
#[repr(u8)]
pub enum Domain {
    /// POSIX UID domain.
    #[default]
    Person = 0,
    /// POSIX GID domain.
    Group = 1,
    /// Organization domain.
    Org = 2,
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.encode(), f)
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    ///
    /// Upper-case hexadecimal digits are accepted.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseError = ParseError::Format;
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            *e = (hi << 4) | lo;
            if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next().ok_or(ERR)? != '-' {
                return Err(ERR);
            }
        }
        if iter.next().is_none() {
            Self(dst).validate()
        } else {
            Err(ERR)
        }
    }
}

impl TryFrom<[u8; 16]> for Uuid {
    type Error = ParseError;

    fn try_from(src: [u8; 16]) -> Result<Self, Self::Error> {
        Self(src).validate()
    }
}

impl TryFrom<&[u8]> for Uuid {
    type Error = ParseError;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(src)
    }
}

impl TryFrom<&str> for Uuid {
    type Error = ParseError;

    fn try_from(src: &str) -> Result<Self, Self::Error> {
        src.parse()
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// An error converting an invalid representation into a [`Uuid`].
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum ParseError {
    /// The string is not in the 8-4-4-4-12 form, or the version or variant field is not a valid
    /// RFC 4122 one.
    Format,

    /// The byte sequence is not exactly 16 bytes long.
    Size,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format => write!(f, "invalid UUID format"),
            Self::Size => write!(f, "invalid UUID size: must be exactly 16 bytes"),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{ParseError, Uuid};

    impl From<Uuid> for String {
        fn from(src: Uuid) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for Uuid {
        type Error = ParseError;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }

    impl std::error::Error for ParseError {}
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::{ParseError, Uuid};

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl TryFrom<uuid::Uuid> for Uuid {
        type Error = ParseError;

        fn try_from(src: uuid::Uuid) -> Result<Self, Self::Error> {
            Self::try_from(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "an RFC 4122 UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Self::Value::from_slice(value).map_err(de::Error::custom)
        }
    }

}
