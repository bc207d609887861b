//! Canonical serialization helpers.
//!
//! The helpers implement the little-endian layouts used by the proof wire
//! encoding in [`crate::merkle::encode_proof`]. Every read carries a
//! [`SerKind`] and field name so decoding failures point at the offending
//! section.

mod bytes;
mod cursor;
mod error;
mod ints;

pub use bytes::{ensure_consumed, write_bytes};
pub use cursor::ByteReader;
pub use error::{SerError, SerKind, SerResult};
pub use ints::{ensure_u32, read_u32, read_u8, write_u32, write_u8};
