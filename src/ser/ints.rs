use super::cursor::ByteReader;
use super::error::{SerError, SerKind, SerResult};

/// Encodes a `u8` into the output buffer.
pub fn write_u8(out: &mut Vec<u8>, value: u8) {
    out.push(value);
}

/// Encodes a `u32` in little-endian order.
pub fn write_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Converts a `usize` into a `u32` length prefix.
pub fn ensure_u32(value: usize, kind: SerKind, field: &'static str) -> SerResult<u32> {
    u32::try_from(value).map_err(|_| SerError::invalid_length(kind, field))
}

pub fn read_u8(cursor: &mut ByteReader<'_>, kind: SerKind, field: &'static str) -> SerResult<u8> {
    Ok(cursor.read_array::<1>(kind, field)?[0])
}

/// Reads a `u32` in little-endian order.
pub fn read_u32(cursor: &mut ByteReader<'_>, kind: SerKind, field: &'static str) -> SerResult<u32> {
    let bytes = cursor.read_array::<4>(kind, field)?;
    Ok(u32::from_le_bytes(bytes))
}
