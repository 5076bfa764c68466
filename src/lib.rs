//! An implementation of RFC 4122 UUID versions 1 through 5
//!
//! ```rust
//! use uuid4122::{uuid1, uuid4, uuid5, Namespace};
//!
//! let uuid = uuid1();
//! println!("{}", uuid); // e.g. "5c3a2f56-8f0e-11ef-a1b3-4b9c2e7d10f5"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! let uuid = uuid4();
//! println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//!
//! let uuid = uuid5(&Namespace::Dns.uuid(), "python.org");
//! assert_eq!(uuid.to_string(), "886313e1-3b8a-5372-9b90-0c9aee199e5d");
//! ```
//!
//! See [RFC 4122](https://www.rfc-editor.org/rfc/rfc4122).
//!
//! # Field and bit layout
//!
//! The time-based versions (1 and 2) are laid out as follows:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          time_low                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |       time_mid                |  ver  |       time_hi         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|         clock_seq         |             node              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                              node                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 60-bit timestamp (`time_hi`, `time_mid`, `time_low`) counts 100-nanosecond intervals
//!   since 1582-10-15 00:00:00 UTC.
//! - The 4-bit `ver` field holds the version number.
//! - The 2-bit `var` field is set at `10`.
//! - The 14-bit `clock_seq` field is randomly initialized and incremented whenever the clock does
//!   not advance past the latest timestamp issued. Once all sequence values have been issued for a
//!   timestamp, the timestamp is advanced by one.
//! - The 48-bit `node` field holds a random node identifier with the multicast bit set, unless a
//!   node identifier is supplied through [`ClockSequence::with_node()`]. In a UUIDv2, the first five
//!   bytes of `node` are replaced with the DCE domain and local identifier.
//!
//! The name-based versions (3 and 5) fill the fields other than `ver` and `var` with the MD5 or
//! SHA-1 hash of a namespace UUID followed by a name, and version 4 fills them with random bits.
//!
//! # Crate features
//!
//! Default features:
//!
//! - `std`: enables the time-based generators and the integration with `std::error::Error`.
//! - `global_gen`: enables the process-wide generator behind the [`uuid1()`] through
//!   [`uuid5()`] entry points.
//!
//! Optional features:
//!
//! - `serde`: enables serialization/deserialization of [`Uuid`] via serde.
//! - `uuid`: enables conversion from/to the [`Uuid`] type of `uuid` crate.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::{insert_timestamp, Domain, ParseError, Uuid, Variant};

pub mod clock_seq;
pub use clock_seq::{ClockSequence, ClockTicket};

pub mod generator;
pub use generator::{RandSource, TimeSource};

#[cfg(feature = "std")]
pub use generator::{StdSystemTime, TimeBasedGenerator};

mod name;
pub use name::HashAlgorithm;

mod v4;

pub mod namespace;
#[cfg(feature = "std")]
pub use namespace::Namespace;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{uuid1, uuid2, uuid3, uuid4, uuid5};
