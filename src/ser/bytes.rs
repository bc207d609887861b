use super::cursor::ByteReader;
use super::error::{SerError, SerKind, SerResult};

/// Appends raw bytes to the output buffer.
pub fn write_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(bytes);
}

/// Ensures that the reader consumed all bytes, otherwise returns a trailing-bytes error.
pub fn ensure_consumed(cursor: &ByteReader<'_>, kind: SerKind) -> SerResult<()> {
    let remaining = cursor.remaining();
    if remaining == 0 {
        Ok(())
    } else {
        Err(SerError::trailing_bytes(kind, cursor.position(), remaining))
    }
}
